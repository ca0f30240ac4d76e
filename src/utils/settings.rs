//! Player settings (~/.flappy/settings.json) and command-line overrides.

use super::persistence::{load_json_or_default, save_json, save_path, StoreError};
use crate::core::rules::{DeathSound, GameRules, RestartPolicy, Variant};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted preferences. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    pub death_sound: DeathSound,
    /// Overrides the variant's restart behaviour when set.
    pub restart_policy: Option<RestartPolicy>,
    /// Fixed RNG seed for reproducible pipe layouts.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Endless,
            death_sound: DeathSound::Hit,
            restart_policy: None,
            seed: None,
        }
    }
}

impl Settings {
    pub const FILENAME: &'static str = "settings.json";

    pub fn load() -> Self {
        match save_path(Self::FILENAME) {
            Ok(path) => load_json_or_default(&path),
            Err(e) => {
                log::warn!("using default settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        save_json(&save_path(Self::FILENAME)?, self)
    }

    /// Resolve the ruleset these settings select.
    pub fn rules(&self) -> GameRules {
        let rules = GameRules::for_variant(self.variant);
        match self.restart_policy {
            Some(policy) => rules.with_restart(policy),
            None => rules,
        }
    }

    /// The settings to persist after a run: these stored settings plus the
    /// preferences the player changed in game. Command-line overrides used by
    /// `played` are left out.
    pub fn with_session_changes(&self, played: &Settings) -> Settings {
        Settings {
            death_sound: played.death_sound,
            ..self.clone()
        }
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(variant) = overrides.variant {
            self.variant = variant;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(policy) = overrides.restart_policy {
            self.restart_policy = Some(policy);
        }
    }
}

/// Settings given on the command line for this run only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub variant: Option<Variant>,
    pub seed: Option<u64>,
    pub restart_policy: Option<RestartPolicy>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(Overrides),
    ResetScore,
    Version,
    Help,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("{0} expects a value")]
    MissingValue(&'static str),
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut overrides = Overrides::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_ref() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "reset-score" => return Ok(Command::ResetScore),
            "--classic" => overrides.variant = Some(Variant::Classic),
            "--endless" => overrides.variant = Some(Variant::Endless),
            "--explicit-restart" => overrides.restart_policy = Some(RestartPolicy::Explicit),
            "--variant" => {
                let value = args.next().ok_or(ConfigError::MissingValue("--variant"))?;
                let value = value.as_ref();
                overrides.variant = Some(
                    Variant::from_name(value)
                        .ok_or_else(|| ConfigError::UnknownVariant(value.to_string()))?,
                );
            }
            "--seed" => {
                let value = args.next().ok_or(ConfigError::MissingValue("--seed"))?;
                let value = value.as_ref();
                overrides.seed = Some(
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidSeed(value.to_string()))?,
                );
            }
            other => return Err(ConfigError::UnknownArgument(other.to_string())),
        }
    }

    Ok(Command::Play(overrides))
}

pub const USAGE: &str = "\
Flappy - terminal Flappy Bird

Usage: flappy [options] [command]

Commands:
  reset-score          Forget the stored high score

Options:
  --classic            Fixed speed, gap and spawn rate
  --endless            Speeds up and narrows over time (default)
  --variant <name>     classic | endless
  --seed <n>           Reproducible pipe layout
  --explicit-restart   Return to the menu after a crash instead of restarting
  --version            Show version information
  --help               Show this help message

Keys: Space/Up/W jump, P pause (endless), S death sound (menu), Q/Esc quit";
