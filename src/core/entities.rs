//! The bird and the pipes it has to dodge.

use super::constants::*;
use super::geometry::Hitbox;

/// The player-controlled bird. Only `y` and `velocity_y` change during play.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity in pixels per frame (positive = downward).
    pub velocity_y: f64,
}

impl Body {
    pub fn new() -> Self {
        Self {
            x: BIRD_START_X,
            y: BIRD_START_Y,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            velocity_y: 0.0,
        }
    }

    /// Apply one frame of gravity. The bird is clamped to the top of the board
    /// but may fall through the bottom, which the session treats as a crash.
    pub fn fall(&mut self, gravity: f64) {
        self.velocity_y += gravity;
        self.y = (self.y + self.velocity_y).max(0.0);
    }

    pub fn jump(&mut self, impulse: f64) {
        self.velocity_y = impulse;
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

/// Which half of a pipe pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Upper,
    Lower,
}

/// One pipe. Pipes are spawned in upper/lower pairs sharing an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Set once the bird has cleared this pipe and the half point was awarded.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width: PIPE_WIDTH,
            height: PIPE_HEIGHT,
            passed: false,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.x, self.y, self.width, self.height)
    }

    /// Trailing (right) edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Fully scrolled past the left edge of the board.
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}
