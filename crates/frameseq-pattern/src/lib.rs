//! Frame sequence filename patterns.
//!
//! A pattern is a filename template in which frame numbers and stereo views
//! are placeholders:
//!
//! | Variable | Expands to                                   |
//! |----------|----------------------------------------------|
//! | `####`   | frame number, zero-padded to 4 digits        |
//! | `%04d`   | frame number, zero-padded to 4 digits        |
//! | `%d`     | frame number, no padding                     |
//! | `%v`     | `l`, `r` or `view<N>`                        |
//! | `%V`     | `left`, `right` or `view<N>`                 |
//!
//! ```rust
//! use frameseq_pattern::{match_filename, parse_pattern, render};
//!
//! let pattern = parse_pattern("/renders/shot_%v.####.exr").unwrap();
//! let m = match_filename("shot_r.0042.exr", &pattern).unwrap();
//! assert_eq!((m.frame, m.view), (Some(42), Some(1)));
//!
//! assert_eq!(
//!     render("/renders/shot_%v.####.exr", 42, 1).unwrap(),
//!     "/renders/shot_r.0042.exr"
//! );
//! ```

pub mod ast;
pub mod matcher;
pub mod parser;
pub mod path;
pub mod render;
pub mod tokenizer;
pub mod validate;


pub use ast::*;
pub use matcher::{PatternMatch, match_filename};
pub use parser::parse_pattern;
pub use path::{split_extension, split_path};
pub use render::render;
pub use tokenizer::{TokenizeError, TokenizeErrorKind, tokenize};
pub use validate::{Extracted, validate};
