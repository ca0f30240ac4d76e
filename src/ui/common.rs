//! Screen regions, the key hint bar and centered overlays.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Where each part of the game screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub board: Rect,
    /// Two rows under the board: status, then key hints.
    pub hints: Rect,
    pub info: Rect,
}

/// Split the inside of the outer border into board, hint rows and info column.
/// ```text
/// ┌──────────────────────────┬─ Info ─┐
/// │ board                    │        │
/// │ status / key hints       │        │
/// └──────────────────────────┴────────┘
/// ```
pub fn split_screen(inner: Rect, info_width: u16) -> ScreenAreas {
    let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(info_width)]).split(inner);
    let rows = Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).split(cols[0]);
    ScreenAreas {
        board: rows[0],
        hints: rows[1],
        info: cols[1],
    }
}

/// Status line followed by `key action` pairs.
pub fn hint_bar<'a>(status: Line<'a>, keys: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (key, action) in keys {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(vec![status, Line::from(spans)]).alignment(Alignment::Center)
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Bordered box centered in `area` holding a title and body lines.
pub fn render_overlay(frame: &mut Frame, area: Rect, title: &str, color: Color, body: Vec<Line>) {
    let rect = centered(area, 44, body.len() as u16 + 4);

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
