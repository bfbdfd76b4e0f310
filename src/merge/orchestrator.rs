//! Column-by-column merge of several parts onto one target tuning.
//!
//! Sections align by ordinal position across parts: section `n` of every
//! part merges into section `n` of the output, with no tempo or timestamp
//! reconciliation. Within a section, columns are processed in ascending
//! order and bass notes claim their strings before melody notes compete.

use crate::merge::allocator::{allocate, Placement};
use crate::merge::{Limits, Role};
use crate::parser::tab_parser::Part;
use crate::pitch::{Pitch, Tuning};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// One cell of a merged section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Fret(u8),
    /// Note with no playable position, rendered as `X`.
    Unplayable,
}

/// Sparse merged grid for one section, keyed by (target string, column).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergedSection {
    pub cells: BTreeMap<(usize, usize), Cell>,
    /// Highest column index, drives the rendered width.
    pub max_column: usize,
}

/// Non-fatal events observed while merging, reported to the caller
/// instead of being logged from inside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDiagnostic {
    /// No playable position existed for the note.
    UnplayableNote {
        section: usize,
        column: usize,
        pitch: Pitch,
    },
    /// Every target string was already taken when the note was reached.
    ColumnFull {
        section: usize,
        column: usize,
        pitch: Pitch,
    },
}

impl fmt::Display for MergeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnplayableNote {
                section,
                column,
                pitch,
            } => write!(
                f,
                "section {section}, column {column}: no playable position for {}, rendered as X",
                pitch.label()
            ),
            Self::ColumnFull {
                section,
                column,
                pitch,
            } => write!(
                f,
                "section {section}, column {column}: all strings taken, dropped {}",
                pitch.label()
            ),
        }
    }
}

/// Everything a merge produced.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub sections: Vec<MergedSection>,
    pub diagnostics: Vec<MergeDiagnostic>,
}

/// A note due at one column, before string assignment.
struct NoteEvent {
    role: Role,
    pitch: Pitch,
}

/// Merge all parts, section by section, onto the target tuning.
///
/// Parts with fewer sections than the longest one simply contribute
/// nothing to the later sections.
pub fn merge_parts(parts: &[Part], target: &Tuning, limits: &Limits) -> MergeOutcome {
    let section_count = parts
        .iter()
        .map(|part| part.sections.len())
        .max()
        .unwrap_or(0);
    let mut outcome = MergeOutcome::default();
    for section_idx in 0..section_count {
        let merged = merge_section(parts, section_idx, target, limits, &mut outcome.diagnostics);
        outcome.sections.push(merged);
    }
    outcome
}

fn merge_section(
    parts: &[Part],
    section_idx: usize,
    target: &Tuning,
    limits: &Limits,
    diagnostics: &mut Vec<MergeDiagnostic>,
) -> MergedSection {
    // gather every part's notes for this section, grouped by column
    let mut columns: BTreeMap<usize, Vec<NoteEvent>> = BTreeMap::new();
    let mut max_column = 0;
    for part in parts {
        let Some(section) = part.sections.get(section_idx) else {
            continue;
        };
        max_column = max_column.max(section.max_column);
        for (&(column, string), &fret) in &section.events {
            let pitch = Pitch(part.tuning.open(string).0 + i32::from(fret));
            columns.entry(column).or_default().push(NoteEvent {
                role: part.role,
                pitch,
            });
        }
    }

    let mut merged = MergedSection {
        cells: BTreeMap::new(),
        max_column,
    };
    for (&column, events) in &columns {
        let mut occupied: HashSet<usize> = HashSet::new();
        let mut bass_frets: Vec<u8> = Vec::new();
        let mut melody_frets: Vec<u8> = Vec::new();
        // bass claims its strings first, then melody competes
        for role in [Role::Bass, Role::Melody] {
            for event in events.iter().filter(|event| event.role == role) {
                let opposing: &[u8] = match role {
                    Role::Bass => &melody_frets,
                    Role::Melody => &bass_frets,
                };
                match allocate(event.pitch, role, target, &occupied, opposing, limits) {
                    Some(Placement { string, fret }) => {
                        merged.cells.insert((string, column), Cell::Fret(fret));
                        occupied.insert(string);
                        match role {
                            Role::Bass => bass_frets.push(fret),
                            Role::Melody => melody_frets.push(fret),
                        }
                    }
                    None => {
                        // keep the note visible on some free string instead
                        // of dropping it
                        let free =
                            (0..target.string_count()).find(|string| !occupied.contains(string));
                        if let Some(string) = free {
                            merged.cells.insert((string, column), Cell::Unplayable);
                            occupied.insert(string);
                            diagnostics.push(MergeDiagnostic::UnplayableNote {
                                section: section_idx,
                                column,
                                pitch: event.pitch,
                            });
                        } else {
                            diagnostics.push(MergeDiagnostic::ColumnFull {
                                section: section_idx,
                                column,
                                pitch: event.pitch,
                            });
                        }
                    }
                }
            }
        }
    }
    merged
}
