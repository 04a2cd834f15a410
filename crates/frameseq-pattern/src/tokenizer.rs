// frameseq-pattern/src/tokenizer.rs

use crate::ast::{FrameWidth, LiteralRun, Part, Span, Variable, VariableKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeErrorKind {
    #[error("'%' inside a printf-style variable (nested variables are not supported)")]
    NestedVariable,
    #[error("view variables do not take a width")]
    ViewWithWidth,
    #[error("frame width above {}", u16::MAX)]
    WidthTooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {at}")]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub at: usize, // byte offset
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Text,
    /// Inside `%...`; `start` is the offset of the `%`.
    Printf { start: usize },
}

/// Tokenizer for the stem of a pattern file name (no path, no extension).
///
/// - A maximal run of `#` is one frame variable whose width is the run length.
/// - `%d`, `%0Nd`, `%v`, `%V` are printf-style variables.
/// - `%%` and a trailing `%` are literal `%`.
/// - A printf-style variable interrupted by anything but digits or a
///   terminator falls back to literal text, as does one left open at the end.
/// - A `%` inside a printf-style variable is an error, and so is a width on
///   `%v`/`%V` or a frame width above 65535.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize, // byte offset
    mode: Mode,
    literal: String,
    literal_start: usize,
    literals_seen: usize,
    parts: Vec<Part>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::Text,
            literal: String::new(),
            literal_start: 0,
            literals_seen: 0,
            parts: Vec::new(),
        }
    }

    /// Tokenizes the whole stem and appends `.extension` as a final literal
    /// run when the extension is non-empty.
    pub fn tokenize_all(mut self, extension: Option<&str>) -> Result<Vec<Part>, TokenizeError> {
        while let Some(ch) = self.peek_char() {
            match self.mode {
                Mode::Text => self.step_text(ch),
                Mode::Printf { start } => self.step_printf(ch, start)?,
            }
        }

        if let Mode::Printf { start } = self.mode {
            self.abort_printf(start, self.pos);
        }
        self.flush_literal();

        if let Some(ext) = extension.filter(|e| !e.is_empty()) {
            let start = self.input.len();
            self.parts.push(Part::Literal(LiteralRun {
                value: format!(".{ext}"),
                span: Span::new(start, start + 1 + ext.len()),
            }));
        }

        Ok(self.parts)
    }

    fn step_text(&mut self, ch: char) {
        match ch {
            '#' => {
                self.flush_literal();
                let start = self.pos;
                let end = self.scan_while(|b| b == b'#');
                self.pos = end;
                self.push_variable(
                    VariableKind::Frame(FrameWidth::Hashes(end - start)),
                    Span::new(start, end),
                );
            }
            '%' => match self.peek_byte_at(self.pos + 1) {
                // Trailing '%' is plain text.
                None => self.push_literal('%', 1),
                // Escaped '%'.
                Some(b'%') => self.push_literal('%', 2),
                Some(_) => {
                    self.flush_literal();
                    self.mode = Mode::Printf { start: self.pos };
                    self.pos += 1;
                }
            },
            _ => self.push_literal(ch, ch.len_utf8()),
        }
    }

    fn step_printf(&mut self, ch: char, start: usize) -> Result<(), TokenizeError> {
        let digits = &self.input[start + 1..self.pos];

        match ch {
            '%' => Err(TokenizeError {
                kind: TokenizeErrorKind::NestedVariable,
                at: self.pos,
            }),
            'd' => {
                let width = if digits.is_empty() {
                    None
                } else {
                    // Only digits get here, so parsing fails on overflow alone.
                    let w = digits.parse::<u16>().map_err(|_| TokenizeError {
                        kind: TokenizeErrorKind::WidthTooLarge,
                        at: start,
                    })?;
                    Some(usize::from(w)).filter(|w| *w > 0)
                };
                self.pos += 1;
                self.mode = Mode::Text;
                self.push_variable(
                    VariableKind::Frame(FrameWidth::Printf(width)),
                    Span::new(start, self.pos),
                );
                Ok(())
            }
            'v' | 'V' => {
                if !digits.is_empty() {
                    return Err(TokenizeError {
                        kind: TokenizeErrorKind::ViewWithWidth,
                        at: start,
                    });
                }
                let kind = if ch == 'v' {
                    VariableKind::ShortView
                } else {
                    VariableKind::LongView
                };
                self.pos += 1;
                self.mode = Mode::Text;
                self.push_variable(kind, Span::new(start, self.pos));
                Ok(())
            }
            // A width must be zero-padded: `%04d`, never `%4d`.
            '0'..='9' if !digits.is_empty() || ch == '0' => {
                self.pos += 1;
                Ok(())
            }
            // Leave '#' for the text scanner so the hash run stays a variable.
            '#' => {
                self.abort_printf(start, self.pos);
                Ok(())
            }
            _ => {
                self.abort_printf(start, self.pos + ch.len_utf8());
                Ok(())
            }
        }
    }

    /// Turns `input[start..end]` back into literal text and resumes scanning
    /// at `end`.
    fn abort_printf(&mut self, start: usize, end: usize) {
        self.literal_start = start;
        self.literal.push_str(&self.input[start..end]);
        self.pos = end;
        self.mode = Mode::Text;
    }

    fn push_literal(&mut self, ch: char, source_len: usize) {
        if self.literal.is_empty() {
            self.literal_start = self.pos;
        }
        self.literal.push(ch);
        self.pos += source_len;
    }

    fn flush_literal(&mut self) {
        if self.literal.is_empty() {
            return;
        }
        let value = std::mem::take(&mut self.literal);
        self.literals_seen += value.len();
        self.parts.push(Part::Literal(LiteralRun {
            value,
            span: Span::new(self.literal_start, self.pos),
        }));
    }

    fn push_variable(&mut self, kind: VariableKind, span: Span) {
        self.parts.push(Part::Variable(Variable {
            kind,
            preceding_literals: self.literals_seen,
            span,
        }));
    }

    fn scan_while<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let mut i = self.pos;
        while i < self.input.len() {
            let b = self.input.as_bytes()[i];
            if !pred(b) {
                break;
            }
            i += 1;
        }
        i
    }

    fn peek_byte_at(&self, pos: usize) -> Option<u8> {
        self.input.as_bytes().get(pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }
}

/// Tokenizes a pattern stem (path and extension already stripped).
pub fn tokenize(stem: &str, extension: Option<&str>) -> Result<Vec<Part>, TokenizeError> {
    Tokenizer::new(stem).tokenize_all(extension)
}
