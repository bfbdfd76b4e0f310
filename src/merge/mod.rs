pub mod allocator;
pub mod orchestrator;
pub mod renderer;

use crate::pitch::Tuning;

/// Mean open-string pitch (semitones above C0) below which a part counts
/// as bass.
pub const BASS_PITCH_THRESHOLD: f64 = 30.0;

/// Hand a part plays in the merged arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Bass,
    Melody,
}

impl Role {
    /// Classify an instrument by its open-string register.
    pub fn for_tuning(tuning: &Tuning) -> Self {
        if tuning.mean_pitch() < BASS_PITCH_THRESHOLD {
            Self::Bass
        } else {
            Self::Melody
        }
    }
}

/// Physical playability limits for the string/fret allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Highest fret on the target instrument
    pub max_fret: u8,
    /// Highest fret the bass hand may reach
    pub bass_max_fret: u8,
    /// Lowest fret the melody hand may reach
    pub melody_min_fret: u8,
    /// Minimum fret distance between simultaneous bass and melody notes
    pub hand_separation: u8,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_fret: 24,
            bass_max_fret: 12,
            melody_min_fret: 7,
            hand_separation: 4,
        }
    }
}
