//! Fixed dimensions and physics constants, in board pixels and per-frame units.

/// Board width in logical pixels.
pub const BOARD_WIDTH: f64 = 750.0;
/// Board height in logical pixels.
pub const BOARD_HEIGHT: f64 = 620.0;

/// Fixed simulation step (~60 FPS, one animation frame).
pub const FRAME_MS: u64 = 16;
/// Largest elapsed time accepted by a single `Session::tick` call.
pub const MAX_TICK_DT_MS: u64 = 100;

pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;
pub const BIRD_START_X: f64 = BOARD_WIDTH / 8.0;
pub const BIRD_START_Y: f64 = BOARD_HEIGHT / 2.0;

pub const PIPE_WIDTH: f64 = 64.0;
pub const PIPE_HEIGHT: f64 = 512.0;
/// New pipes enter at the right edge of the board.
pub const PIPE_SPAWN_X: f64 = BOARD_WIDTH;

/// Downward acceleration per frame.
pub const GRAVITY: f64 = 0.4;
/// Vertical velocity set by a jump (negative = upward).
pub const JUMP_IMPULSE: f64 = -6.0;

/// Horizontal pipe velocity at the start of a session.
pub const BASE_VELOCITY_X: f64 = -4.0;
/// Per-frame speed-up applied by the endless ruleset.
pub const SPEED_INCREASE_RATE: f64 = 0.0001;
/// Fastest pipe velocity the speed-up may reach.
pub const MAX_PIPE_VELOCITY_X: f64 = -30.0;

pub const ENDLESS_START_GAP: f64 = 200.0;
pub const ENDLESS_MIN_GAP: f64 = 50.0;
pub const ENDLESS_GAP_STEP: f64 = 1.0;

pub const ENDLESS_SPAWN_INTERVAL_MS: u64 = 1200;
pub const ENDLESS_MIN_SPAWN_INTERVAL_MS: u64 = 400;
pub const ENDLESS_SPAWN_DECAY_MS: u64 = 10;

pub const CLASSIC_GAP: f64 = BOARD_HEIGHT / 4.0;
pub const CLASSIC_SPAWN_INTERVAL_MS: u64 = 1500;

/// Points awarded per pipe passed. Each pair holds two pipes, so a pair is worth one point.
pub const SCORE_PER_PIPE: f64 = 0.5;

/// Storage key for the persisted best score.
pub const HIGH_SCORE_KEY: &str = "highScore";
