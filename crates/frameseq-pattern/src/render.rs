// frameseq-pattern/src/render.rs

use crate::ast::{Part, Pattern, VariableKind};
use crate::parser::parse_pattern;
use crate::tokenizer::TokenizeError;

/// Expand `pattern` into the filename of one frame and view.
///
/// `render("/out/shot_%V.####.exr", 7, 1)` is `/out/shot_right.0007.exr`.
pub fn render(pattern: &str, frame: u64, view: u32) -> Result<String, TokenizeError> {
    Ok(parse_pattern(pattern)?.render(frame, view))
}

impl Pattern {
    /// Filename for `frame` and `view`, with the pattern's directory.
    ///
    /// Frame numbers are zero-padded to the variable's width; a frame with more
    /// digits than the width is written in full.
    pub fn render(&self, frame: u64, view: u32) -> String {
        let mut out = String::with_capacity(self.path.len() + self.name.len() + 8);
        out.push_str(&self.path);

        for part in &self.parts {
            match part {
                Part::Literal(lit) => out.push_str(&lit.value),
                Part::Variable(var) => push_value(&mut out, var.kind, frame, view),
            }
        }
        out
    }
}

fn push_value(out: &mut String, kind: VariableKind, frame: u64, view: u32) {
    match kind {
        VariableKind::Frame(width) => match width.min_digits() {
            Some(width) => {
                let digits = frame.to_string();
                out.push_str(&"0".repeat(width.saturating_sub(digits.len())));
                out.push_str(&digits);
            }
            None => out.push_str(&frame.to_string()),
        },
        VariableKind::ShortView => match view {
            0 => out.push('l'),
            1 => out.push('r'),
            n => out.push_str(&format!("view{n}")),
        },
        VariableKind::LongView => match view {
            0 => out.push_str("left"),
            1 => out.push_str("right"),
            n => out.push_str(&format!("view{n}")),
        },
    }
}
