//! Rulesets for the two game variants.
//!
//! `Classic` keeps every constant fixed. `Endless` speeds pipes up every frame,
//! narrows the gap and shortens the spawn interval with each pair, and adds a
//! pause key and a selectable death sound.

use super::constants::*;
use serde::{Deserialize, Serialize};

/// Which ruleset a session plays by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Classic,
    #[default]
    Endless,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Classic, Variant::Endless];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Endless => "Endless",
        }
    }

    /// Parse a variant name as typed on the command line or in settings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::Classic),
            "endless" => Some(Self::Endless),
            _ => None,
        }
    }
}

/// What a jump does on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Jump resets the session and play resumes immediately.
    #[default]
    OnJump,
    /// Jump returns to the start menu; another jump starts a new session.
    Explicit,
}

/// Sound cue played when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathSound {
    #[default]
    Hit,
    Risky,
}

impl DeathSound {
    pub fn toggled(self) -> Self {
        match self {
            Self::Hit => Self::Risky,
            Self::Risky => Self::Hit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hit => "OFF",
            Self::Risky => "ON",
        }
    }
}

/// Linear decay from `start` toward `floor` by `step` per application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay<T> {
    pub start: T,
    pub floor: T,
    pub step: T,
}

/// Resolved parameters for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameRules {
    pub variant: Variant,
    pub gravity: f64,
    pub jump_impulse: f64,
    pub base_velocity_x: f64,
    /// Per-frame speed-up and the velocity cap it stops at. `None` holds speed constant.
    pub speed_ramp: Option<(f64, f64)>,
    pub gap: Decay<f64>,
    pub spawn_interval_ms: Decay<u64>,
    pub pause_enabled: bool,
    pub death_sound_enabled: bool,
    pub restart: RestartPolicy,
}

impl GameRules {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                variant,
                gravity: GRAVITY,
                jump_impulse: JUMP_IMPULSE,
                base_velocity_x: BASE_VELOCITY_X,
                speed_ramp: None,
                gap: Decay {
                    start: CLASSIC_GAP,
                    floor: CLASSIC_GAP,
                    step: 0.0,
                },
                spawn_interval_ms: Decay {
                    start: CLASSIC_SPAWN_INTERVAL_MS,
                    floor: CLASSIC_SPAWN_INTERVAL_MS,
                    step: 0,
                },
                pause_enabled: false,
                death_sound_enabled: false,
                restart: RestartPolicy::OnJump,
            },
            Variant::Endless => Self {
                variant,
                gravity: GRAVITY,
                jump_impulse: JUMP_IMPULSE,
                base_velocity_x: BASE_VELOCITY_X,
                speed_ramp: Some((SPEED_INCREASE_RATE, MAX_PIPE_VELOCITY_X)),
                gap: Decay {
                    start: ENDLESS_START_GAP,
                    floor: ENDLESS_MIN_GAP,
                    step: ENDLESS_GAP_STEP,
                },
                spawn_interval_ms: Decay {
                    start: ENDLESS_SPAWN_INTERVAL_MS,
                    floor: ENDLESS_MIN_SPAWN_INTERVAL_MS,
                    step: ENDLESS_SPAWN_DECAY_MS,
                },
                pause_enabled: true,
                death_sound_enabled: true,
                restart: RestartPolicy::OnJump,
            },
        }
    }

    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_constant() {
        let rules = GameRules::for_variant(Variant::Classic);
        assert!(rules.speed_ramp.is_none());
        assert!((rules.gap.start - 155.0).abs() < f64::EPSILON);
        assert!((rules.gap.start - rules.gap.floor).abs() < f64::EPSILON);
        assert_eq!(rules.spawn_interval_ms.start, 1500);
        assert_eq!(rules.spawn_interval_ms.step, 0);
        assert!(!rules.pause_enabled);
        assert!(!rules.death_sound_enabled);
    }

    #[test]
    fn test_endless_decays() {
        let rules = GameRules::for_variant(Variant::Endless);
        assert_eq!(rules.speed_ramp, Some((0.0001, -30.0)));
        assert!((rules.gap.start - 200.0).abs() < f64::EPSILON);
        assert!((rules.gap.floor - 50.0).abs() < f64::EPSILON);
        assert_eq!(rules.spawn_interval_ms.start, 1200);
        assert_eq!(rules.spawn_interval_ms.floor, 400);
        assert_eq!(rules.spawn_interval_ms.step, 10);
        assert!(rules.pause_enabled);
    }

    #[test]
    fn test_variant_from_name() {
        assert_eq!(Variant::from_name("classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_name(" Endless "), Some(Variant::Endless));
        assert_eq!(Variant::from_name("hard"), None);
    }

    #[test]
    fn test_death_sound_toggle() {
        assert_eq!(DeathSound::Hit.toggled(), DeathSound::Risky);
        assert_eq!(DeathSound::Risky.toggled(), DeathSound::Hit);
    }

    #[test]
    fn test_with_restart_overrides_policy() {
        let rules = GameRules::for_variant(Variant::Endless).with_restart(RestartPolicy::Explicit);
        assert_eq!(rules.restart, RestartPolicy::Explicit);
    }
}
