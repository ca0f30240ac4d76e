//! One play-through: state machine, fixed-step physics, scoring and collisions.
//!
//! A `Session` owns everything that changes while playing. The binary feeds it
//! inputs and elapsed time, then drains the `SessionEvent`s it produced to
//! drive sound, persistence and rendering.

use super::constants::*;
use super::entities::{Body, Obstacle};
use super::rules::{GameRules, RestartPolicy};
use super::spawner::Spawner;
use rand::Rng;
use std::collections::VecDeque;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Start menu is showing; nothing moves.
    NotStarted,
    Running,
    Paused,
    Over,
}

/// UI-agnostic inputs the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Flap, start, or restart depending on state (Space, Up, W).
    Jump,
    /// Toggle pause (P). Ignored when the rules have no pause.
    Pause,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Fell through the bottom of the board.
    Fell,
    /// Overlapped a pipe.
    HitPipe,
}

/// Things that happened during input handling or a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started,
    Jumped,
    Scored { score: f64 },
    Paused,
    Resumed,
    GameOver { score: f64, cause: CrashCause },
    NewHighScore { score: f64, previous: f64 },
    ReturnedToMenu,
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct Session {
    pub rules: GameRules,
    pub state: SessionState,
    pub body: Body,
    /// Active pipes, oldest (leftmost) first.
    pub obstacles: VecDeque<Obstacle>,
    pub score: f64,
    pub high_score: f64,
    /// Shared horizontal pipe velocity (negative = leftward).
    pub velocity_x: f64,
    pub spawner: Spawner,
    /// Sub-frame time accumulator (milliseconds).
    pub accumulated_time_ms: u64,
    /// Frames stepped since the session last started.
    pub frame_count: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Create a session sitting on the start menu.
    pub fn new(rules: GameRules, high_score: f64) -> Self {
        Self {
            state: SessionState::NotStarted,
            body: Body::new(),
            obstacles: VecDeque::new(),
            score: 0.0,
            high_score,
            velocity_x: rules.base_velocity_x,
            spawner: Spawner::new(&rules),
            accumulated_time_ms: 0,
            frame_count: 0,
            events: Vec::new(),
            rules,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Take every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Process one player input.
    pub fn handle_input(&mut self, input: GameInput) {
        match (input, self.state) {
            (GameInput::Jump, SessionState::NotStarted) => {
                self.start();
                self.jump();
            }
            (GameInput::Jump, SessionState::Running) => self.jump(),
            (GameInput::Jump, SessionState::Over) => match self.rules.restart {
                RestartPolicy::OnJump => {
                    self.start();
                    self.jump();
                }
                RestartPolicy::Explicit => {
                    self.state = SessionState::NotStarted;
                    self.events.push(SessionEvent::ReturnedToMenu);
                }
            },
            (GameInput::Jump, SessionState::Paused) => {}
            (GameInput::Pause, SessionState::Running) if self.rules.pause_enabled => {
                self.state = SessionState::Paused;
                self.events.push(SessionEvent::Paused);
            }
            (GameInput::Pause, SessionState::Paused) => {
                self.state = SessionState::Running;
                self.events.push(SessionEvent::Resumed);
            }
            (GameInput::Pause, _) => {}
        }
    }

    /// Reset the board and begin playing. The spawn timer is re-armed, never duplicated.
    pub fn start(&mut self) {
        self.body = Body::new();
        self.obstacles.clear();
        self.score = 0.0;
        self.velocity_x = self.rules.base_velocity_x;
        self.spawner.reset();
        self.accumulated_time_ms = 0;
        self.frame_count = 0;
        self.state = SessionState::Running;
        log::debug!("session started ({})", self.rules.variant.name());
        self.events.push(SessionEvent::Started);
    }

    fn jump(&mut self) {
        self.body.jump(self.rules.jump_impulse);
        self.events.push(SessionEvent::Jumped);
    }

    /// Advance the session by `dt_ms` of wall time.
    ///
    /// Steps physics in fixed `FRAME_MS` increments. `dt_ms` is clamped so a
    /// long stall cannot fast-forward the game. Returns true if any frame ran.
    pub fn tick<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> bool {
        if !self.is_running() {
            return false;
        }

        self.accumulated_time_ms += dt_ms.min(MAX_TICK_DT_MS);
        let mut changed = false;

        while self.accumulated_time_ms >= FRAME_MS {
            self.accumulated_time_ms -= FRAME_MS;
            self.step_frame(rng);
            changed = true;

            if !self.is_running() {
                self.accumulated_time_ms = 0;
                break;
            }
        }

        changed
    }

    /// Single fixed frame. No-op unless running.
    pub fn step_frame<R: Rng>(&mut self, rng: &mut R) {
        if !self.is_running() {
            return;
        }
        self.frame_count += 1;

        if let Some((rate, max_velocity)) = self.rules.speed_ramp {
            if self.velocity_x > max_velocity {
                self.velocity_x -= rate;
            }
        }

        self.body.fall(self.rules.gravity);

        let mut crash = None;
        if self.body.y > BOARD_HEIGHT {
            crash = Some(CrashCause::Fell);
        }

        let bird = self.body.hitbox();
        for obstacle in self.obstacles.iter_mut() {
            obstacle.x += self.velocity_x;

            if !obstacle.passed && bird.x > obstacle.right() {
                obstacle.passed = true;
                self.score += SCORE_PER_PIPE;
                self.events.push(SessionEvent::Scored { score: self.score });
            }

            if crash.is_none() && bird.overlaps(&obstacle.hitbox()) {
                crash = Some(CrashCause::HitPipe);
            }
        }

        while self
            .obstacles
            .front()
            .is_some_and(|front| front.is_off_screen())
        {
            self.obstacles.pop_front();
        }

        if let Some(cause) = crash {
            self.finish(cause);
            return;
        }

        if let Some(pair) = self.spawner.advance(FRAME_MS, rng) {
            self.obstacles.extend(pair);
        }
    }

    /// Enter `Over`, stop the spawner and record a new best if earned.
    fn finish(&mut self, cause: CrashCause) {
        self.state = SessionState::Over;
        self.spawner.timer.cancel();
        log::debug!(
            "session over after {} frames: {:?}, score {}",
            self.frame_count,
            cause,
            format_score(self.score)
        );

        self.events.push(SessionEvent::GameOver {
            score: self.score,
            cause,
        });

        if self.score > self.high_score {
            let previous = self.high_score;
            self.high_score = self.score;
            self.events.push(SessionEvent::NewHighScore {
                score: self.score,
                previous,
            });
        }
    }
}

/// Render a half-point score without a trailing `.0` ("3", "3.5").
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{}", score)
    }
}
