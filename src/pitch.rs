//! Note names, absolute pitches and string tunings.

use crate::RuxError;
use nom::character::complete::{digit1, one_of};
use nom::combinator::{all_consuming, map_res, opt};
use nom::{IResult, Parser};

/// Chromatic scale with sharp spellings, indexed by pitch class.
pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Absolute pitch in semitones above C0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pitch(pub i32);

/// `letter[accidental]octave`, e.g. `E2`, `f#3`, `Bb1`
fn note_label(i: &str) -> IResult<&str, (char, Option<char>, u16)> {
    (
        one_of("ABCDEFGabcdefg"),
        opt(one_of("#b")),
        map_res(digit1, str::parse),
    )
        .parse(i)
}

/// Signed semitone offset of a note name from the C of its octave.
///
/// Flats step the base letter down one semitone, so `Cb` borrows from the
/// octave below (`Cb1` is the same pitch as `B0`).
fn note_offset(letter: char, accidental: Option<char>) -> Result<i32, RuxError> {
    let letter_name = letter.to_string();
    let base = SHARP_NOTES
        .iter()
        .position(|note| *note == letter_name)
        .expect("note letter comes from the parser") as i32;
    match accidental {
        None => Ok(base),
        Some('b') => Ok(base - 1),
        Some(accidental) => {
            let name = format!("{letter}{accidental}");
            SHARP_NOTES
                .iter()
                .position(|note| *note == name)
                .map(|index| index as i32)
                .ok_or(RuxError::InvalidNoteName(name))
        }
    }
}

impl Pitch {
    /// Parse a note label like `E2`, `F#3` or `Bb1` (letter case-insensitive).
    pub fn parse(label: &str) -> Result<Self, RuxError> {
        let (_, (letter, accidental, octave)) = all_consuming(note_label)
            .parse(label.trim())
            .map_err(|_| RuxError::InvalidNoteFormat(label.to_string()))?;
        let offset = note_offset(letter.to_ascii_uppercase(), accidental)?;
        Ok(Self(offset + i32::from(octave) * 12))
    }

    /// Sharp-spelled note label, e.g. `D#3`.
    pub fn label(self) -> String {
        let octave = self.0.div_euclid(12);
        let name = SHARP_NOTES[self.0.rem_euclid(12) as usize];
        format!("{name}{octave}")
    }
}

/// Open-string pitches of an instrument, index 0 = first string as written
/// in the tab file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    pub strings: Vec<Pitch>,
}

impl Tuning {
    /// Parse one note label per string.
    pub fn parse<S: AsRef<str>>(labels: &[S]) -> Result<Self, RuxError> {
        let strings = labels
            .iter()
            .map(|label| Pitch::parse(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { strings })
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    pub fn open(&self, string: usize) -> Pitch {
        self.strings[string]
    }

    /// Mean open-string pitch, used to tell bass parts from melody parts.
    pub fn mean_pitch(&self) -> f64 {
        if self.strings.is_empty() {
            return 0.0;
        }
        let sum: i32 = self.strings.iter().map(|pitch| pitch.0).sum();
        f64::from(sum) / self.strings.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_standard_guitar_tuning() {
        let tuning = Tuning::parse(&["E2", "A2", "D3", "G3", "B3", "E4"]).unwrap();
        assert_eq!(tuning.string_count(), 6);
        assert_eq!(tuning.open(0), Pitch(28));
        assert_eq!(tuning.open(1), Pitch(33));
        assert_eq!(tuning.open(5), Pitch(52));
    }

    #[test]
    fn label_round_trip() {
        for label in ["C0", "E2", "F#3", "A#4", "B0", "G9"] {
            let pitch = Pitch::parse(label).unwrap();
            assert_eq!(pitch.label(), label, "round trip of {label}");
        }
    }

    #[test]
    fn flat_wraps_across_octave_boundary() {
        assert_eq!(
            Pitch::parse("Cb1").unwrap(),
            Pitch::parse("B0").unwrap(),
            "Cb1 is the B below C1"
        );
        assert_eq!(Pitch::parse("Db2").unwrap(), Pitch::parse("C#2").unwrap());
    }

    #[test]
    fn letter_is_case_insensitive() {
        assert_eq!(Pitch::parse("e2").unwrap(), Pitch::parse("E2").unwrap());
        assert_eq!(Pitch::parse("bb1").unwrap(), Pitch::parse("A#1").unwrap());
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "E", "H2", "2E", "E-1", "E2x", "#2"] {
            let err = Pitch::parse(label).unwrap_err();
            assert!(
                matches!(err, RuxError::InvalidNoteFormat(_)),
                "{label} should be a format error, got {err}"
            );
        }
    }

    #[test]
    fn rejects_unknown_note_names() {
        let err = Pitch::parse("E#2").unwrap_err();
        assert!(matches!(err, RuxError::InvalidNoteName(_)), "got {err}");
    }

    #[test]
    fn tuning_parse_propagates_bad_label() {
        let err = Tuning::parse(&["E2", "nope", "D3"]).unwrap_err();
        assert!(matches!(err, RuxError::InvalidNoteFormat(_)));
    }
}
