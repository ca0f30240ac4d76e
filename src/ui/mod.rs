//! Terminal rendering for the game screen.

pub mod board;
pub mod common;

use crate::app::App;
use crate::audio::SoundSink;
use crate::core::session::{format_score, Session, SessionState};
use crate::utils::persistence::ScoreStore;
use common::{hint_bar, render_overlay, split_screen};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 22;

pub fn draw<S: ScoreStore, A: SoundSink>(frame: &mut Frame, app: &App<S, A>) {
    let session = &app.session;
    let title = format!(" Flappy Bird: {} ", session.rules.variant.name());
    let area = frame.size();
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let layout = split_screen(outer.inner(area), INFO_PANEL_WIDTH);
    frame.render_widget(Clear, area);
    frame.render_widget(outer, area);

    board::render_board(frame, layout.board, session);
    render_status(frame, layout.hints, session);
    render_info_panel(frame, layout.info, session);

    match session.state {
        SessionState::NotStarted => render_start_menu(frame, layout.board, app),
        SessionState::Paused => render_overlay(
            frame,
            layout.board,
            "Paused",
            Color::White,
            vec![
                Line::from("Press P to Resume"),
                Line::from("Press Q to Quit"),
            ],
        ),
        SessionState::Over => render_game_over(frame, layout.board, app),
        SessionState::Running => {}
    }
}

fn render_status(frame: &mut Frame, area: Rect, session: &Session) {
    let mut controls = vec![("[Space/Up/W]", "Jump")];
    if session.rules.pause_enabled {
        controls.push(("[P]", "Pause"));
    }
    controls.push(("[Q]", "Quit"));

    let status = match session.state {
        SessionState::NotStarted => Line::styled("Press Space to start!", Style::default().fg(Color::Yellow)),
        SessionState::Running => Line::styled(
            format!("Score: {}", format_score(session.score)),
            Style::default().fg(Color::Green),
        ),
        SessionState::Paused => Line::styled("Paused", Style::default().fg(Color::White)),
        SessionState::Over => Line::styled("Game over!", Style::default().fg(Color::Red)),
    };
    frame.render_widget(hint_bar(status, &controls), area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!(" {}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(color)),
        ])
    };

    let lines = vec![
        row("Score", format_score(session.score), Color::White),
        row("Best", format_score(session.high_score), Color::Yellow),
        Line::from(""),
        row("Speed", format!("{:.2}", -session.velocity_x), Color::Cyan),
        row("Gap", format!("{:.0}", session.spawner.gap()), Color::Green),
        row(
            "Spawn",
            format!("{}ms", session.spawner.timer.interval_ms()),
            Color::Green,
        ),
        row("Pipes", session.obstacles.len().to_string(), Color::Gray),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_start_menu<S: ScoreStore, A: SoundSink>(frame: &mut Frame, area: Rect, app: &App<S, A>) {
    let mut body = vec![
        Line::from("Press SPACE or UP ARROW to Start"),
        Line::from(format!(
            "High Score: {}",
            format_score(app.session.high_score)
        )),
    ];
    if app.session.rules.death_sound_enabled {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            format!("[S] Risky Death Sound: {}", app.settings.death_sound.label()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    render_overlay(frame, area, "Welcome to Flappy Bird!", Color::Yellow, body);
}

fn render_game_over<S: ScoreStore, A: SoundSink>(frame: &mut Frame, area: Rect, app: &App<S, A>) {
    let session = &app.session;
    let mut body = vec![
        Line::from("Press SPACE or UP ARROW to Restart"),
        Line::from(format!("Score: {}", format_score(session.score))),
        Line::from(format!("High Score: {}", format_score(session.high_score))),
    ];
    if app.can_toggle_sound() {
        body.push(Line::from(Span::styled(
            format!("[S] Risky Death Sound: {}", app.settings.death_sound.label()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    render_overlay(frame, area, "Game over!", Color::Red, body);
}
