//! Numbered file sequence discovery.
//!
//! Two ways in:
//!
//! - from a pattern such as `shot_%v.####.exr`, see [`files_from_pattern`];
//! - from one member file, see [`sequence_from_file`] and
//!   [`sequences_in_directory`], which compare decomposed file names with
//!   each other and need no pattern at all.

mod content;
mod discover;
mod error;
mod ranges;
mod sequence;
mod settings;
mod walk;

pub use content::{FileNameContent, FileNameElement, decompose, match_files};
pub use discover::{
    SequenceFromPattern, files_from_pattern, sequence_from_file, sequences_in_directory,
};
pub use error::Error;
pub use ranges::{FrameRange, format_ranges, frame_ranges};
pub use sequence::{PatternStyle, Sequence};
pub use settings::{DEFAULT_MAX_GAP, DiscoverySettings};
pub use walk::{FileSource, LocalFs};
