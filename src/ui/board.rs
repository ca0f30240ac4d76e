//! Rasterizes the 750x620 board into terminal cells.

use crate::core::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::core::session::Session;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What one terminal cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Pipe,
    Bird,
}

/// Sample the board at each cell's center. The bird always gets a cell, even
/// when the terminal is too small for its hitbox to cover a sample point.
pub fn rasterize(session: &Session, width: usize, height: usize) -> Vec<Vec<Cell>> {
    let mut grid = vec![vec![Cell::Empty; width]; height];
    if width == 0 || height == 0 {
        return grid;
    }

    let x_scale = BOARD_WIDTH / width as f64;
    let y_scale = BOARD_HEIGHT / height as f64;

    for (row, cells) in grid.iter_mut().enumerate() {
        let py = (row as f64 + 0.5) * y_scale;
        for (col, cell) in cells.iter_mut().enumerate() {
            let px = (col as f64 + 0.5) * x_scale;
            let hit = session.obstacles.iter().any(|o| {
                let b = o.hitbox();
                px >= b.x && px < b.right() && py >= b.y && py < b.bottom()
            });
            if hit {
                *cell = Cell::Pipe;
            }
        }
    }

    let bird = session.body.hitbox();
    let center_col = ((bird.x + bird.width / 2.0) / x_scale) as usize;
    let center_row = ((bird.y + bird.height / 2.0) / y_scale) as usize;
    if center_row < height && center_col < width {
        grid[center_row][center_col] = Cell::Bird;
    }

    grid
}

pub fn render_board(frame: &mut Frame, area: Rect, session: &Session) {
    let grid = rasterize(session, area.width as usize, area.height as usize);

    let bird_glyph = if session.body.velocity_y < -0.5 {
        "▲"
    } else if session.body.velocity_y > 1.0 {
        "▼"
    } else {
        "►"
    };

    let lines: Vec<Line> = grid
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => Span::raw(" "),
                        Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
                        Cell::Bird => Span::styled(
                            bird_glyph,
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        ),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
