//! Utility modules: build info, persistence, settings.

pub mod build_info;
pub mod persistence;
pub mod settings;

pub use persistence::{JsonFileStore, MemoryStore, ScoreStore, StoreError};
pub use settings::{parse_args, Command, ConfigError, Overrides, Settings};
