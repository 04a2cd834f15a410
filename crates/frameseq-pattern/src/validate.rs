// frameseq-pattern/src/validate.rs

use crate::ast::{FrameWidth, VariableKind};

/// Value read from the text a variable covers in a filename.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Extracted {
    Frame(u64),
    View(u32),
}

/// Checks `text` against one variable and extracts its value.
///
/// - `%v`: `l` is view 0, `r` is view 1, `view<N>` is view N.
/// - `%V`: `left` is view 0, `right` is view 1, `view<N>` is view N.
/// - Frame variables take a digit string at least as long as the declared
///   width. A longer string may not start with `0`: a frame larger than the
///   width is written without padding.
///
/// View names compare ASCII case-insensitively.
pub fn validate(kind: VariableKind, text: &str) -> Option<Extracted> {
    match kind {
        VariableKind::ShortView => short_view(text).map(Extracted::View),
        VariableKind::LongView => long_view(text).map(Extracted::View),
        VariableKind::Frame(width) => frame_number(width, text).map(Extracted::Frame),
    }
}

fn short_view(text: &str) -> Option<u32> {
    if text.eq_ignore_ascii_case("l") {
        Some(0)
    } else if text.eq_ignore_ascii_case("r") {
        Some(1)
    } else {
        numbered_view(text)
    }
}

fn long_view(text: &str) -> Option<u32> {
    if text.eq_ignore_ascii_case("left") {
        Some(0)
    } else if text.eq_ignore_ascii_case("right") {
        Some(1)
    } else {
        numbered_view(text)
    }
}

fn numbered_view(text: &str) -> Option<u32> {
    let prefix = text.get(..4)?;
    if !prefix.eq_ignore_ascii_case("view") {
        return None;
    }
    parse_digits(&text[4..])
}

fn frame_number(width: FrameWidth, text: &str) -> Option<u64> {
    if let Some(min) = width.min_digits() {
        if text.len() < min {
            return None;
        }
        if text.len() > min && text.starts_with('0') {
            return None;
        }
    }
    parse_digits(text)
}

fn parse_digits<T: std::str::FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH4: VariableKind = VariableKind::Frame(FrameWidth::Hashes(4));
    const PRINTF4: VariableKind = VariableKind::Frame(FrameWidth::Printf(Some(4)));
    const ANY: VariableKind = VariableKind::Frame(FrameWidth::Printf(None));

    #[test]
    fn short_views() {
        assert_eq!(validate(VariableKind::ShortView, "l"), Some(Extracted::View(0)));
        assert_eq!(validate(VariableKind::ShortView, "R"), Some(Extracted::View(1)));
        assert_eq!(validate(VariableKind::ShortView, "view3"), Some(Extracted::View(3)));
        assert_eq!(validate(VariableKind::ShortView, "VIEW12"), Some(Extracted::View(12)));
        assert_eq!(validate(VariableKind::ShortView, "left"), None);
        assert_eq!(validate(VariableKind::ShortView, "view"), None);
    }

    #[test]
    fn long_views() {
        assert_eq!(validate(VariableKind::LongView, "left"), Some(Extracted::View(0)));
        assert_eq!(validate(VariableKind::LongView, "Right"), Some(Extracted::View(1)));
        assert_eq!(validate(VariableKind::LongView, "view2"), Some(Extracted::View(2)));
        assert_eq!(validate(VariableKind::LongView, "l"), None);
        assert_eq!(validate(VariableKind::LongView, "viewx"), None);
    }

    #[test]
    fn fixed_width_frames() {
        for kind in [HASH4, PRINTF4] {
            assert_eq!(validate(kind, "0007"), Some(Extracted::Frame(7)));
            assert_eq!(validate(kind, "12345"), Some(Extracted::Frame(12345)));
            assert_eq!(validate(kind, "7"), None);
            assert_eq!(validate(kind, "00007"), None);
        }
    }

    #[test]
    fn unconstrained_frames() {
        assert_eq!(validate(ANY, "7"), Some(Extracted::Frame(7)));
        assert_eq!(validate(ANY, "00007"), Some(Extracted::Frame(7)));
        assert_eq!(validate(ANY, "l"), None);
    }

    #[test]
    fn view_text_is_not_a_frame() {
        assert_eq!(validate(HASH4, "view"), None);
        assert_eq!(validate(VariableKind::ShortView, "0001"), None);
    }
}
