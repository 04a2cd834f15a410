// frameseq-pattern/src/path.rs

/// Splits `filename` after its last `/` or `\`.
///
/// The directory part keeps its trailing separator and is empty when there is
/// no separator: `"/a/b/c.png"` gives `("/a/b/", "c.png")`.
pub fn split_path(filename: &str) -> (&str, &str) {
    match filename.rfind(|c| c == '/' || c == '\\') {
        Some(i) => filename.split_at(i + 1),
        None => ("", filename),
    }
}

/// Splits a file name at its last `.`.
///
/// A name without a dot, with nothing before the dot, or with nothing after it
/// has no extension and is returned whole.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}
