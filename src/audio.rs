//! Fire-and-forget sound cues.

use crate::core::rules::DeathSound;
use std::io::{self, Write};

pub trait SoundSink {
    fn play(&mut self, sound: DeathSound);
}

/// Rings the terminal bell: once for the hit sound, three times for the risky one.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, sound: DeathSound) {
        let rings = match sound {
            DeathSound::Hit => 1,
            DeathSound::Risky => 3,
        };
        let mut out = io::stdout();
        if let Err(e) = out.write_all(&b"\x07".repeat(rings)).and_then(|_| out.flush()) {
            log::warn!("could not play {:?}: {}", sound, e);
        }
    }
}

/// Remembers what it was asked to play.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<DeathSound>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, sound: DeathSound) {
        self.played.push(sound);
    }
}
