//! Decomposition of a single filename into text and number runs.
//!
//! This is what sequence detection works from when no pattern is given: two
//! files belong together when their text runs are identical and only their
//! number runs differ.

use frameseq_pattern::split_path;

/// One run of a file name: either digits or everything between digits.
///
/// Number runs keep their exact text, leading zeros included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNameElement {
    Text(String),
    Number(String),
}

impl FileNameElement {
    pub fn as_str(&self) -> &str {
        match self {
            FileNameElement::Text(s) | FileNameElement::Number(s) => s,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, FileNameElement::Number(_))
    }
}

/// A filename split into its directory, name, extension and runs.
///
/// Built once from a filename and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameContent {
    absolute: String,
    path: String,
    name: String,
    extension: Option<String>,
    elements: Vec<FileNameElement>,
    has_single_number: bool,
    pattern: String,
}

impl FileNameContent {
    pub fn new(absolute: impl Into<String>) -> Self {
        let absolute = absolute.into();
        let (path, name) = split_path(&absolute);
        let elements = split_runs(name);

        let has_single_number = elements.iter().filter(|e| e.is_number()).count() == 1;
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .map(str::to_string);
        let pattern = indexed_pattern(&elements);

        Self {
            path: path.to_string(),
            name: name.to_string(),
            extension,
            elements,
            has_single_number,
            pattern,
            absolute,
        }
    }

    /// The filename exactly as given.
    pub fn absolute(&self) -> &str {
        &self.absolute
    }

    /// Directory with its trailing separator, empty for a bare name.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name without its directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn elements(&self) -> &[FileNameElement] {
        &self.elements
    }

    pub fn has_single_number(&self) -> bool {
        self.has_single_number
    }

    /// The name with every number run replaced by one `#` per digit followed
    /// by the run's index: `file08_001.png` gives `file##0_###1.png`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn text_elements(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| !e.is_number())
            .map(FileNameElement::as_str)
            .collect()
    }

    pub fn numbers(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .filter(|e| e.is_number())
            .map(FileNameElement::as_str)
    }

    pub fn number_count(&self) -> usize {
        self.numbers().count()
    }

    /// Digits of the `index`-th number run (0-based, left to right).
    pub fn number_at(&self, index: usize) -> Option<&str> {
        self.numbers().nth(index)
    }

    /// True for names like `0001` or `0001.png`.
    pub fn is_composed_only_of_digits(&self) -> bool {
        matches!(self.elements.len(), 1 | 2) && self.elements[0].is_number()
    }

    /// The directory plus the name with the number runs at `indexes` turned
    /// into `#` runs and every other run kept as is.
    ///
    /// `None` when an index is past the last number run.
    pub fn pattern_with_frame_at(&self, indexes: &[usize]) -> Option<String> {
        if indexes.iter().any(|&i| i >= self.number_count()) {
            return None;
        }

        let mut out = self.path.clone();
        let mut run = 0;
        for element in &self.elements {
            match element {
                FileNameElement::Text(text) => out.push_str(text),
                FileNameElement::Number(digits) => {
                    if indexes.contains(&run) {
                        out.push_str(&"#".repeat(digits.len()));
                    } else {
                        out.push_str(digits);
                    }
                    run += 1;
                }
            }
        }
        Some(out)
    }

    /// Compare this file with `other` to see if both can be frames of one
    /// sequence.
    ///
    /// Both names must have the same runs, with identical text runs. A
    /// differing number run is a frame candidate only if both sides are
    /// padded consistently: `1` against `01` is not, because no single frame
    /// width produces both. Without any candidate there is no match.
    ///
    /// Returns the indexes of the candidates whose values are closest, since
    /// a frame number usually moves less than, say, a take number. Ties
    /// return every tied run.
    pub fn matches(&self, other: &FileNameContent) -> Option<Vec<usize>> {
        if self.elements.len() != other.elements.len() {
            return None;
        }

        // (number run index, distance between the two values)
        let mut candidates: Vec<(usize, u64)> = Vec::new();
        let mut run = 0;

        for (mine, theirs) in self.elements.iter().zip(&other.elements) {
            match (mine, theirs) {
                (FileNameElement::Text(a), FileNameElement::Text(b)) => {
                    if a != b {
                        return None;
                    }
                }
                (FileNameElement::Number(a), FileNameElement::Number(b)) => {
                    if a != b && padding_consistent(a, b) {
                        let distance = a.parse::<u64>().ok()?.abs_diff(b.parse::<u64>().ok()?);
                        candidates.push((run, distance));
                    }
                    run += 1;
                }
                _ => return None,
            }
        }

        // Same name, or no differing run that can be a frame.
        let closest = candidates.iter().map(|(_, d)| *d).min()?;
        Some(
            candidates
                .into_iter()
                .filter(|(_, d)| *d == closest)
                .map(|(i, _)| i)
                .collect(),
        )
    }
}

/// Decompose `filename` (optionally with a directory) into a
/// [`FileNameContent`].
pub fn decompose(filename: &str) -> FileNameContent {
    FileNameContent::new(filename)
}

/// File-to-file match, see [`FileNameContent::matches`].
pub fn match_files(a: &FileNameContent, b: &FileNameContent) -> Option<Vec<usize>> {
    a.matches(b)
}

/// Two digit strings of different lengths can only come from one frame width
/// if the longer one is a genuinely bigger number, i.e. neither carries
/// padding beyond the shorter one's length.
fn padding_consistent(a: &str, b: &str) -> bool {
    if a.len() == b.len() {
        return true;
    }
    let (shorter, longer) = if a.len() < b.len() { (a, b) } else { (b, a) };
    !longer.starts_with('0') && !(shorter.len() > 1 && shorter.starts_with('0'))
}

fn split_runs(name: &str) -> Vec<FileNameElement> {
    let mut elements = Vec::new();
    let mut start = 0;
    let mut in_number = false;

    for (i, b) in name.bytes().enumerate() {
        let digit = b.is_ascii_digit();
        if i > start && digit != in_number {
            elements.push(element(&name[start..i], in_number));
            start = i;
        }
        in_number = digit;
    }
    if start < name.len() {
        elements.push(element(&name[start..], in_number));
    }
    elements
}

fn element(text: &str, number: bool) -> FileNameElement {
    if number {
        FileNameElement::Number(text.to_string())
    } else {
        FileNameElement::Text(text.to_string())
    }
}

fn indexed_pattern(elements: &[FileNameElement]) -> String {
    let mut out = String::new();
    let mut run = 0;
    for element in elements {
        match element {
            FileNameElement::Text(text) => out.push_str(text),
            FileNameElement::Number(digits) => {
                out.push_str(&"#".repeat(digits.len()));
                out.push_str(&run.to_string());
                run += 1;
            }
        }
    }
    out
}
