//! Plain-text tablature parsing.
//!
//! A tab line is `<label>|<body>` where the label is a note name with an
//! optional octave and the body holds fret digits, dashes and ornament
//! symbols. Consecutive tab lines form a section; anything else separates
//! sections.

use crate::merge::Role;
use crate::pitch::Tuning;
use crate::RuxError;
use nom::character::complete::{char, digit0, one_of};
use nom::combinator::{opt, recognize};
use nom::{IResult, Parser};
use std::collections::BTreeMap;

/// Number of leading lines scanned for tuning labels.
const TUNING_DETECTION_WINDOW: usize = 50;

/// Characters allowed in a tab body: frets, dashes and ornaments.
const TAB_BODY_CHARS: &str = "0123456789-hpbr/\\~|";

fn is_tab_body_char(c: char) -> bool {
    TAB_BODY_CHARS.contains(c)
}

/// `letter[accidental][octave]` as written at the start of a tab line
fn line_label(i: &str) -> IResult<&str, &str> {
    recognize((one_of("ABCDEFGabcdefg"), opt(one_of("#b")), digit0)).parse(i)
}

/// Split a line into its tab label and body, or `None` for non-tab lines.
///
/// Recognition is prefix based: the body must start with at least one tab
/// character, trailing oddities do not disqualify the line.
pub fn split_tab_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    let (body, (label, _)) = (line_label, char('|')).parse(trimmed).ok()?;
    if !body.starts_with(is_tab_body_char) {
        return None;
    }
    Some((label, body))
}

/// Uppercase the note letter, leave accidental and octave as written.
fn normalize_label(label: &str) -> String {
    let mut normalized = String::with_capacity(label.len());
    let mut chars = label.chars();
    if let Some(letter) = chars.next() {
        normalized.push(letter.to_ascii_uppercase());
    }
    normalized.extend(chars);
    normalized
}

fn strip_octave(label: &str) -> &str {
    label.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Scan the leading lines for octave-qualified tuning labels (`E2|...`),
/// keeping the first occurrence of each distinct label in order.
pub fn detect_tuning(lines: &[String]) -> Option<Vec<String>> {
    let mut labels: Vec<String> = Vec::new();
    for line in lines.iter().take(TUNING_DETECTION_WINDOW) {
        let Some((label, _)) = split_tab_line(line) else {
            continue;
        };
        // a tuning label must pin down the octave
        if !label.ends_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let normalized = normalize_label(label);
        if !labels.contains(&normalized) {
            labels.push(normalized);
        }
    }
    if labels.is_empty() {
        log::debug!("no tuning labels found in the first {TUNING_DETECTION_WINDOW} lines");
        None
    } else {
        Some(labels)
    }
}

/// Partition lines into maximal runs of consecutive tab lines.
pub fn extract_sections(lines: &[String]) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if split_tab_line(line).is_some() {
            current.push(line.as_str());
        } else if !current.is_empty() {
            sections.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Sparse fret events of one section, keyed by (column, string index).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TabSection {
    pub events: BTreeMap<(usize, usize), u8>,
    /// Highest column index, drives the rendered width.
    pub max_column: usize,
}

impl TabSection {
    /// Extract the fret events of a run of tab lines.
    ///
    /// Each line is matched to a tuning string by exact label first, then
    /// by octave-stripped letter, never re-using a string within the
    /// section. Unmatched lines are skipped with a warning.
    pub fn from_lines(lines: &[&str], tuning_labels: &[String], max_fret: u8) -> Self {
        let mut section = Self::default();
        let mut claimed = vec![false; tuning_labels.len()];
        for line in lines {
            let Some((label, body)) = split_tab_line(line) else {
                continue;
            };
            let Some(string) = match_string_index(label, tuning_labels, &claimed) else {
                log::warn!("no tuning string matches tab line label {label:?}, line skipped");
                continue;
            };
            claimed[string] = true;
            let column_count = body.chars().count();
            if column_count > 0 {
                section.max_column = section.max_column.max(column_count - 1);
            }
            scan_frets(body, string, max_fret, &mut section.events);
        }
        section
    }
}

/// Match a line label against the tuning, skipping already claimed strings.
fn match_string_index(label: &str, tuning_labels: &[String], claimed: &[bool]) -> Option<usize> {
    let normalized = normalize_label(label);
    let exact = tuning_labels
        .iter()
        .enumerate()
        .find(|(index, tuning_label)| !claimed[*index] && **tuning_label == normalized)
        .map(|(index, _)| index);
    if exact.is_some() {
        return exact;
    }
    let bare = strip_octave(&normalized);
    tuning_labels
        .iter()
        .enumerate()
        .find(|(index, tuning_label)| !claimed[*index] && strip_octave(tuning_label) == bare)
        .map(|(index, _)| index)
}

/// Record maximal digit runs as fret events at the column of their first
/// digit. Runs above the fret cap do not represent frets and are dropped.
fn scan_frets(body: &str, string: usize, max_fret: u8, events: &mut BTreeMap<(usize, usize), u8>) {
    let mut record = |start: usize, value: u32| {
        if value <= u32::from(max_fret) {
            events.insert((start, string), value as u8);
        } else {
            log::debug!("dropping digit run {value} above fret cap {max_fret} at column {start}");
        }
    };
    let mut run: Option<(usize, u32)> = None;
    for (column, c) in body.chars().enumerate() {
        if let Some(digit) = c.to_digit(10) {
            match run.as_mut() {
                Some((_, value)) => *value = value.saturating_mul(10).saturating_add(digit),
                None => run = Some((column, digit)),
            }
        } else if let Some((start, value)) = run.take() {
            record(start, value);
        }
    }
    if let Some((start, value)) = run {
        record(start, value);
    }
}

/// One input file's contribution to a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub role: Role,
    pub tuning: Tuning,
    pub sections: Vec<TabSection>,
}

/// Parse one input's lines into a merge part.
///
/// `name` only decorates errors and logs.
pub fn parse_part(
    name: &str,
    lines: &[String],
    tuning_labels: &[String],
    max_fret: u8,
) -> Result<Part, RuxError> {
    let tuning = Tuning::parse(tuning_labels)?;
    let runs = extract_sections(lines);
    if runs.is_empty() {
        return Err(RuxError::NoSectionsFound(name.to_string()));
    }
    let normalized: Vec<String> = tuning_labels
        .iter()
        .map(|label| normalize_label(label))
        .collect();
    let sections: Vec<TabSection> = runs
        .iter()
        .map(|run| TabSection::from_lines(run, &normalized, max_fret))
        .collect();
    let role = Role::for_tuning(&tuning);
    log::debug!(
        "{name}: {} strings, {} sections, role {role:?}",
        tuning.string_count(),
        sections.len()
    );
    Ok(Part {
        role,
        tuning,
        sections,
    })
}
