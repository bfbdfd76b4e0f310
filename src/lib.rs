//! Ruxtab - guitar tablature tuning converter and multi-part merger
//!
//! This library provides:
//! - Parsing of plain-text guitar tabs (`E2|--3-5--` style lines)
//! - Tuning conversion for single tab files
//! - A temporal merge engine that combines several parts onto one target
//!   tuning, reassigning every note to a playable string and fret
//!
//! # Example
//!
//! ```no_run
//! use ruxtab::{detect_tuning, merge_parts, parse_part, render_sections, Limits, Tuning};
//!
//! let text = std::fs::read_to_string("bass.txt").unwrap();
//! let lines: Vec<String> = text.lines().map(str::to_string).collect();
//! let labels = detect_tuning(&lines).unwrap();
//! let limits = Limits::default();
//! let part = parse_part("bass.txt", &lines, &labels, limits.max_fret).unwrap();
//! let target = Tuning::parse(&["E2", "A2", "D3", "G3", "B3", "E4"]).unwrap();
//! let outcome = merge_parts(&[part], &target, &limits);
//! let merged_lines = render_sections(&outcome.sections, &target);
//! ```

pub mod convert;
pub mod error;
pub mod merge;
pub mod parser;
pub mod pitch;

// Re-export main types for convenience
pub use convert::convert_lines;
pub use error::RuxError;
pub use merge::allocator::{allocate, Placement};
pub use merge::orchestrator::{merge_parts, Cell, MergeDiagnostic, MergeOutcome, MergedSection};
pub use merge::renderer::{render_section, render_sections, UNPLAYABLE_MARKER};
pub use merge::{Limits, Role};
pub use parser::tab_parser::{detect_tuning, extract_sections, parse_part, Part, TabSection};
pub use pitch::{Pitch, Tuning, SHARP_NOTES};
