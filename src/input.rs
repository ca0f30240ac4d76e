//! Keyboard mapping for the game screen.

use crate::core::session::GameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything a key press can mean to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Game(GameInput),
    /// Switch the death sound (start and game-over screens, endless only).
    ToggleSound,
    Quit,
    Other,
}

pub fn map_key(key: KeyEvent) -> AppInput {
    if key.kind == KeyEventKind::Release {
        return AppInput::Other;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppInput::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            AppInput::Game(GameInput::Jump)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => AppInput::Game(GameInput::Pause),
        KeyCode::Char('s') | KeyCode::Char('S') => AppInput::ToggleSound,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppInput::Quit,
        _ => AppInput::Other,
    }
}
