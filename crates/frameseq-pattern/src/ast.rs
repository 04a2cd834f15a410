// frameseq-pattern/src/ast.rs

/// Byte span in the pattern's file name (the pattern with its path stripped).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize, // inclusive
    pub end: usize,   // exclusive
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A run of text every matching filename must contain.
///
/// `value` is the unescaped text (`%%` in the pattern becomes `%`), stored with
/// its original case. Matching compares it ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRun {
    pub value: String,
    pub span: Span,
}

/// How many digits a frame number variable declares.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameWidth {
    /// `####`: one digit per hash.
    Hashes(usize),

    /// `%04d` is `Printf(Some(4))`, `%d` is `Printf(None)`.
    Printf(Option<usize>),
}

impl FrameWidth {
    /// Minimum number of digits, or `None` when any digit string is accepted.
    pub fn min_digits(self) -> Option<usize> {
        match self {
            FrameWidth::Hashes(n) => Some(n),
            FrameWidth::Printf(n) => n,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VariableKind {
    /// `###`, `%04d` or `%d`
    Frame(FrameWidth),
    /// `%v`: `l`, `r` or `view<N>`
    ShortView,
    /// `%V`: `left`, `right` or `view<N>`
    LongView,
}

impl VariableKind {
    pub fn is_view(self) -> bool {
        matches!(self, VariableKind::ShortView | VariableKind::LongView)
    }
}

/// A placeholder in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub kind: VariableKind,

    /// Number of literal bytes that precede this variable in the pattern.
    /// Anchors the variable when a filename is scanned left to right.
    pub preceding_literals: usize,

    /// Span of the variable's source text, e.g. `%04d`.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Literal(LiteralRun),
    Variable(Variable),
}

/// A tokenized pattern such as `/renders/shot_%V.####.exr`.
///
/// `parts` covers the file name only; the directory is kept apart in `path`
/// (with its trailing separator). When the name has an extension, the last
/// part is the literal `.ext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub path: String,
    pub name: String,
    pub parts: Vec<Part>,
}

impl Pattern {
    pub fn literals(&self) -> impl Iterator<Item = &LiteralRun> {
        self.parts.iter().filter_map(|p| match p {
            Part::Literal(l) => Some(l),
            Part::Variable(_) => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.parts.iter().filter_map(|p| match p {
            Part::Variable(v) => Some(v),
            Part::Literal(_) => None,
        })
    }

    pub fn has_variables(&self) -> bool {
        self.variables().next().is_some()
    }

    pub fn has_frame_variable(&self) -> bool {
        self.variables()
            .any(|v| matches!(v.kind, VariableKind::Frame(_)))
    }

    pub fn has_view_variable(&self) -> bool {
        self.variables().any(|v| v.kind.is_view())
    }
}
