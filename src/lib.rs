//! Flappy - terminal Flappy Bird.
//!
//! The library exposes the simulation core, persistence, settings and the
//! vendor SDK call queue for testing and external use.

pub mod app;
pub mod audio;
pub mod core;
pub mod input;
pub mod sdk;
pub mod utils;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;

pub use crate::app::App;
pub use crate::core::{GameInput, GameRules, Session, SessionEvent, SessionState, Variant};
pub use crate::ui::draw;
