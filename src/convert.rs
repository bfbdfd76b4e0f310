//! Single-file tuning conversion, without the merge engine.
//!
//! Every fret shifts by the open-string pitch difference of its string;
//! ornaments and prose lines pass through untouched.

use crate::merge::renderer::UNPLAYABLE_MARKER;
use crate::parser::tab_parser::split_tab_line;
use crate::pitch::Tuning;
use crate::RuxError;

/// Convert all tab lines of a file to the target tuning.
///
/// Tab lines map onto strings in file order; a blank or pipe-less line
/// restarts the string counter for the next block of tab lines.
pub fn convert_lines(
    lines: &[String],
    source: &Tuning,
    target: &Tuning,
) -> Result<Vec<String>, RuxError> {
    if source.string_count() != target.string_count() {
        return Err(RuxError::TuningLengthMismatch {
            source_len: source.string_count(),
            target: target.string_count(),
        });
    }
    let mut converted = Vec::with_capacity(lines.len());
    let mut string_idx = 0;
    for line in lines {
        match split_tab_line(line) {
            Some((_, body)) if string_idx < source.string_count() => {
                converted.push(convert_tab_line(body, string_idx, source, target));
                string_idx += 1;
            }
            Some(_) => {
                // more tab lines than strings, nothing to map them to
                log::warn!("tab line {} has no string in the source tuning", string_idx + 1);
                converted.push(line.clone());
                string_idx += 1;
            }
            None => {
                converted.push(line.clone());
                if line.trim().is_empty() || !line.contains(['|', '-']) {
                    string_idx = 0;
                }
            }
        }
    }
    Ok(converted)
}

/// Shift one tab body and rewrite its label to the target string's note.
fn convert_tab_line(body: &str, string: usize, source: &Tuning, target: &Tuning) -> String {
    let diff = i64::from(target.open(string).0) - i64::from(source.open(string).0);
    let label = target.open(string).label();
    // octave digits are dropped for display, like hand-written tabs do
    let mut line = format!("{}|", label.trim_end_matches(|c: char| c.is_ascii_digit()));
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(digit) = c.to_digit(10) {
            let mut fret = i64::from(digit);
            while let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
                fret = fret.saturating_mul(10).saturating_add(i64::from(digit));
                chars.next();
            }
            let shifted = fret + diff;
            if shifted < 0 {
                line.push(UNPLAYABLE_MARKER);
            } else {
                line.push_str(&shifted.to_string());
            }
        } else {
            line.push(c);
        }
    }
    line
}
