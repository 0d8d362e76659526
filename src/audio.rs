//! Named sound cues
//!
//! The simulation requests playback by cue; decoding and mixing are the
//! host's business. Clip offsets locate each cue inside the packed audio
//! sprite so a host can cut it without carrying its own table.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A window into the packed audio sprite (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clip {
    pub start_ms: u32,
    pub duration_ms: u32,
}

/// Explosion cues; one plays per enemy removed by collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Short crack
    Boom1,
    /// Rolling blast
    Boom2,
    /// Long rumble
    Boom3,
}

impl SoundCue {
    /// All cues, in sprite order
    pub const ALL: [SoundCue; 3] = [SoundCue::Boom1, SoundCue::Boom2, SoundCue::Boom3];

    /// Cue name as the host's audio sprite knows it
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Boom1 => "boom1",
            SoundCue::Boom2 => "boom2",
            SoundCue::Boom3 => "boom3",
        }
    }

    /// Clip window inside the packed sprite
    pub fn clip(&self) -> Clip {
        match self {
            SoundCue::Boom1 => Clip {
                start_ms: 0,
                duration_ms: 636,
            },
            SoundCue::Boom2 => Clip {
                start_ms: 2000,
                duration_ms: 2274,
            },
            SoundCue::Boom3 => Clip {
                start_ms: 5000,
                duration_ms: 3056,
            },
        }
    }

    /// Uniform pick over the three booms
    pub fn random_boom(rng: &mut impl Rng) -> SoundCue {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}
