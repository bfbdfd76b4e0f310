//! Error types for the ruxtab library

use std::io;

/// Library error type for ruxtab operations
#[derive(Debug, thiserror::Error)]
pub enum RuxError {
    /// Note label does not match `letter[accidental]octave`
    #[error("invalid note format: {0}")]
    InvalidNoteFormat(String),

    /// Resolved note name is not one of the 12 chromatic names
    #[error("invalid note name: {0}")]
    InvalidNoteName(String),

    /// Source and target tunings disagree on string count
    #[error("source and target tunings must have the same number of strings: {source_len} vs {target}")]
    TuningLengthMismatch { source_len: usize, target: usize },

    /// No octave-qualified tuning labels found and no tuning supplied
    #[error("could not detect source tuning, specify it explicitly")]
    NoTuningDetected,

    /// No parsable tab content
    #[error("no tab sections found in {0}")]
    NoSectionsFound(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for RuxError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
