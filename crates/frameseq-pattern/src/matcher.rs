// frameseq-pattern/src/matcher.rs

use tracing::trace;

use crate::ast::{Pattern, Variable, VariableKind};
use crate::path::split_path;
use crate::validate::{Extracted, validate};

/// Values read from a filename that matched a pattern.
///
/// `frame` is `None` when the pattern has no frame variable, `view` when it
/// has no view variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PatternMatch {
    pub frame: Option<u64>,
    pub view: Option<u32>,
}

/// Decide whether `filename` is an instance of `pattern`.
///
/// Any directory in `filename` is ignored. Matching happens in two passes:
///
/// 1. Every literal run of the pattern must occur in the name, in order,
///    ASCII case-insensitively. Runs are searched as substrings, so `marleen`
///    also matches inside `marleenBG`.
/// 2. The name is scanned left to right. Digit runs and view names (`left`,
///    `right`, `view<N>`, a bare `l`/`r` where `%v` is expected) each consume
///    the next variable, which must sit after exactly as many literal bytes as
///    were scanned so far and must accept the text.
///
/// Variables repeated in the pattern must all read the same value.
pub fn match_filename(filename: &str, pattern: &Pattern) -> Option<PatternMatch> {
    let (_, name) = split_path(filename);

    if !literals_in_order(name, pattern) {
        trace!(name, pattern = %pattern.name, "literal runs not found in order");
        return None;
    }

    let variables: Vec<&Variable> = pattern.variables().collect();
    if variables.is_empty() {
        return Some(PatternMatch::default());
    }

    let found = Scanner::new(name, &variables).run();
    if found.is_none() {
        trace!(name, pattern = %pattern.name, "variables do not line up");
    }
    found
}

fn literals_in_order(name: &str, pattern: &Pattern) -> bool {
    let mut from = 0;
    for lit in pattern.literals() {
        match find_ignore_ascii_case(name, &lit.value, from) {
            Some(pos) => from = pos + lit.value.len(),
            None => return false,
        }
    }
    true
}

fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let hay = haystack.as_bytes().get(from..)?;
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(from);
    }
    hay.windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|p| p + from)
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

/// Positional scan of one file name against the pattern's variables.
struct Scanner<'a> {
    name: &'a str,
    pos: usize, // byte offset
    literals_seen: usize,
    variables: &'a [&'a Variable],
    next: usize,
    found: PatternMatch,
}

impl<'a> Scanner<'a> {
    fn new(name: &'a str, variables: &'a [&'a Variable]) -> Self {
        Self {
            name,
            pos: 0,
            literals_seen: 0,
            variables,
            next: 0,
            found: PatternMatch::default(),
        }
    }

    fn run(mut self) -> Option<PatternMatch> {
        while let Some(b) = self.name.as_bytes().get(self.pos).copied() {
            if b.is_ascii_digit() {
                let end = self.scan_digits(self.pos);
                self.consume(end)?;
            } else if matches!(b.to_ascii_lowercase(), b'l' | b'r' | b'v') {
                self.view_candidate(b.to_ascii_lowercase())?;
            } else {
                self.skip_literal_char();
            }
        }

        (self.next == self.variables.len()).then_some(self.found)
    }

    fn view_candidate(&mut self, lower: u8) -> Option<()> {
        let rest = &self.name[self.pos..];

        if starts_with_ignore_ascii_case(rest, "left") {
            return self.consume(self.pos + 4);
        }
        if starts_with_ignore_ascii_case(rest, "right") {
            return self.consume(self.pos + 5);
        }
        if starts_with_ignore_ascii_case(rest, "view") {
            let end = self.scan_digits(self.pos + 4);
            if end > self.pos + 4 {
                return self.consume(end);
            }
            // "view" without a number is ordinary text.
            self.pos += 4;
            self.literals_seen += 4;
            return Some(());
        }

        // A lone 'l' or 'r' is common in names, so it only counts as a view
        // where the pattern expects `%v`.
        if lower != b'v' && self.expects_short_view_here() {
            return self.consume(self.pos + 1);
        }
        self.skip_literal_char();
        Some(())
    }

    fn expects_short_view_here(&self) -> bool {
        self.variables.get(self.next).is_some_and(|v| {
            v.kind == VariableKind::ShortView && v.preceding_literals == self.literals_seen
        })
    }

    /// Feeds `name[pos..end]` to the next variable.
    fn consume(&mut self, end: usize) -> Option<()> {
        let var = self.variables.get(self.next)?;
        if var.preceding_literals != self.literals_seen {
            return None;
        }

        match validate(var.kind, &self.name[self.pos..end])? {
            Extracted::Frame(n) => {
                if self.found.frame.is_some_and(|prev| prev != n) {
                    return None;
                }
                self.found.frame = Some(n);
            }
            Extracted::View(n) => {
                if self.found.view.is_some_and(|prev| prev != n) {
                    return None;
                }
                self.found.view = Some(n);
            }
        }

        self.next += 1;
        self.pos = end;
        Some(())
    }

    fn skip_literal_char(&mut self) {
        let len = self.name[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos += len;
        self.literals_seen += len;
    }

    fn scan_digits(&self, from: usize) -> usize {
        let bytes = self.name.as_bytes();
        let mut i = from;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    }
}
