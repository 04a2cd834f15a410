// frameseq-pattern/src/parser.rs

use crate::ast::Pattern;
use crate::path::{split_extension, split_path};
use crate::tokenizer::{TokenizeError, tokenize};

/// Parse a full pattern such as `/renders/shot_%v.####.exr` into a [`Pattern`].
///
/// The directory is split off first, then the extension; only the stem is
/// scanned for variables. A `.####` suffix is therefore an extension and stays
/// literal text.
pub fn parse_pattern(input: &str) -> Result<Pattern, TokenizeError> {
    let (path, name) = split_path(input);
    let (stem, extension) = split_extension(name);

    let parts = tokenize(stem, extension)?;

    Ok(Pattern {
        path: path.to_string(),
        name: name.to_string(),
        parts,
    })
}
