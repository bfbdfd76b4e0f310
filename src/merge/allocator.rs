//! String and fret selection for the merge engine.
//!
//! The allocator is a pure function of its inputs: given a pitch, a role
//! and the state of the current column it either picks a string/fret pair
//! or reports that the note has no playable position.

use crate::merge::{Limits, Role};
use crate::pitch::{Pitch, Tuning};
use std::collections::HashSet;

/// Penalty for landing outside the role's half of the fretboard.
const WRONG_REGION_PENALTY: f64 = 100.0;
/// Weight of the distance between a fret and the middle of the role's window.
const FRET_DISTANCE_WEIGHT: f64 = 0.1;

/// Octave shifts tried when the plain pitch finds no spot in the role's
/// preferred region.
const OCTAVE_OFFSETS: [i32; 5] = [0, 12, -12, 24, -24];

/// A chosen target string and fret for one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub string: usize,
    pub fret: u8,
}

/// Inclusive fret window a role may use.
const fn fret_window(role: Role, limits: &Limits) -> (u8, u8) {
    match role {
        Role::Bass => (0, limits.bass_max_fret),
        Role::Melody => (limits.melody_min_fret, limits.max_fret),
    }
}

/// Bass prefers the lower half of the strings, melody the upper half.
const fn in_preferred_region(role: Role, string: usize, string_count: usize) -> bool {
    let split = string_count / 2;
    match role {
        Role::Bass => string < split,
        Role::Melody => string >= split,
    }
}

/// Find the playable position for `pitch`, shifting it by octaves if that
/// is what it takes to land in the role's preferred region.
///
/// Returns `None` when no octave of the pitch fits any free string.
pub fn allocate(
    pitch: Pitch,
    role: Role,
    tuning: &Tuning,
    occupied: &HashSet<usize>,
    opposing_frets: &[u8],
    limits: &Limits,
) -> Option<Placement> {
    let mut fallback = None;
    for offset in OCTAVE_OFFSETS {
        let shifted = Pitch(pitch.0 + offset);
        let Some(placement) = place(shifted, role, tuning, occupied, opposing_frets, limits)
        else {
            continue;
        };
        if in_preferred_region(role, placement.string, tuning.string_count()) {
            return Some(placement);
        }
        // remember the first out-of-region spot in case nothing better shows up
        if fallback.is_none() {
            fallback = Some(placement);
        }
    }
    fallback
}

/// Best legal position for an exact pitch, or `None`.
fn place(
    pitch: Pitch,
    role: Role,
    tuning: &Tuning,
    occupied: &HashSet<usize>,
    opposing_frets: &[u8],
    limits: &Limits,
) -> Option<Placement> {
    let (window_low, window_high) = fret_window(role, limits);
    let window_midpoint = (f64::from(window_low) + f64::from(window_high)) / 2.0;
    let mut best: Option<(f64, Placement)> = None;
    for (string, open) in tuning.strings.iter().enumerate() {
        if occupied.contains(&string) {
            continue;
        }
        let fret = pitch.0 - open.0;
        if fret < 0 || fret > i32::from(limits.max_fret) {
            continue;
        }
        let fret = fret as u8;
        if fret < window_low || fret > window_high {
            continue;
        }
        // both hands play at once, keep them apart on the neck
        if opposing_frets
            .iter()
            .any(|&opposing| opposing.abs_diff(fret) < limits.hand_separation)
        {
            continue;
        }
        let mut score = FRET_DISTANCE_WEIGHT * (f64::from(fret) - window_midpoint).abs();
        if !in_preferred_region(role, string, tuning.string_count()) {
            score += WRONG_REGION_PENALTY;
        }
        // strictly-less keeps the lowest string index on ties
        match best {
            Some((best_score, _)) if best_score <= score => {}
            _ => best = Some((score, Placement { string, fret })),
        }
    }
    best.map(|(_, placement)| placement)
}
