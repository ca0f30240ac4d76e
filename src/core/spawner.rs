//! Pipe pair spawning on a session-owned timer.

use super::constants::{PIPE_HEIGHT, PIPE_SPAWN_X};
use super::entities::{Obstacle, ObstacleKind};
use super::rules::{Decay, GameRules};
use rand::Rng;

/// Repeating timer driven by simulated milliseconds.
///
/// The timer belongs to the session, so a restart re-arms this one timer
/// instead of stacking a new one on top.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    schedule: Decay<u64>,
    interval_ms: u64,
    elapsed_ms: u64,
    armed: bool,
}

impl SpawnTimer {
    pub fn new(schedule: Decay<u64>) -> Self {
        Self {
            schedule,
            interval_ms: schedule.start,
            elapsed_ms: 0,
            armed: false,
        }
    }

    /// Restart from the initial interval and begin counting.
    pub fn arm(&mut self) {
        self.interval_ms = self.schedule.start;
        self.elapsed_ms = 0;
        self.armed = true;
    }

    /// Stop counting. Elapsed time is discarded.
    pub fn cancel(&mut self) {
        self.elapsed_ms = 0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Milliseconds until the next fire.
    pub fn remaining_ms(&self) -> u64 {
        self.interval_ms.saturating_sub(self.elapsed_ms)
    }

    /// Advance by `dt_ms`. Returns true when the interval elapsed; the interval
    /// then shrinks by one decay step, never below the floor.
    pub fn advance(&mut self, dt_ms: u64) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < self.interval_ms {
            return false;
        }
        self.elapsed_ms -= self.interval_ms;
        self.interval_ms = self
            .interval_ms
            .saturating_sub(self.schedule.step)
            .max(self.schedule.floor);
        true
    }
}

/// Creates pipe pairs with a random anchor and a gap that may narrow per spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    gap_schedule: Decay<f64>,
    gap: f64,
    pub timer: SpawnTimer,
}

impl Spawner {
    pub fn new(rules: &GameRules) -> Self {
        Self {
            gap_schedule: rules.gap,
            gap: rules.gap.start,
            timer: SpawnTimer::new(rules.spawn_interval_ms),
        }
    }

    /// Restore the starting gap and re-arm the timer.
    pub fn reset(&mut self) {
        self.gap = self.gap_schedule.start;
        self.timer.arm();
    }

    /// Gap that the most recent pair was created with (or the starting gap).
    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Advance the timer and spawn a pair if it fired.
    pub fn advance<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Option<[Obstacle; 2]> {
        if self.timer.advance(dt_ms) {
            Some(self.spawn_pair(rng))
        } else {
            None
        }
    }

    /// Create an upper/lower pair at the right edge of the board.
    ///
    /// The upper pipe's top sits between a quarter and three quarters of a pipe
    /// height above the board, so its bottom edge lands in the middle band of
    /// the field. The gap narrows before the pair is placed.
    pub fn spawn_pair<R: Rng>(&mut self, rng: &mut R) -> [Obstacle; 2] {
        let anchor = -PIPE_HEIGHT / 4.0 - rng.gen::<f64>() * (PIPE_HEIGHT / 2.0);
        self.gap = (self.gap - self.gap_schedule.step).max(self.gap_schedule.floor);

        [
            Obstacle::new(ObstacleKind::Upper, PIPE_SPAWN_X, anchor),
            Obstacle::new(
                ObstacleKind::Lower,
                PIPE_SPAWN_X,
                anchor + PIPE_HEIGHT + self.gap,
            ),
        ]
    }
}
