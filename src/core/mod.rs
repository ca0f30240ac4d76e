//! Simulation core: rules, entities, spawning and the session state machine.

pub mod constants;
pub mod entities;
pub mod geometry;
pub mod rules;
pub mod session;
pub mod spawner;

pub use constants::*;
pub use entities::{Body, Obstacle, ObstacleKind};
pub use geometry::Hitbox;
pub use rules::{DeathSound, GameRules, RestartPolicy, Variant};
pub use session::{format_score, CrashCause, GameInput, Session, SessionEvent, SessionState};
pub use spawner::{SpawnTimer, Spawner};
