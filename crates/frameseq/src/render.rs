use frameseq_core::{PatternStyle, Sequence, SequenceFromPattern};
use serde::Serialize;

use crate::args::OutputFormat;

// The core types stay serde-free; JSON goes through these helpers.
#[derive(Serialize)]
struct JsonMatch<'a> {
    pattern: &'a str,
    count: usize,
    first_frame: Option<u64>,
    last_frame: Option<u64>,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    frame: u64,
    view: Option<u32>,
    path: &'a str,
}

#[derive(Serialize)]
struct JsonSequence<'a> {
    pattern: String,
    summary: String,
    path: Option<&'a str>,
    extension: Option<&'a str>,
    first_frame: Option<u64>,
    last_frame: Option<u64>,
    frames: Vec<u64>,
    files: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_size: Option<u64>,
}

impl<'a> JsonSequence<'a> {
    fn new(seq: &'a Sequence) -> Self {
        Self {
            pattern: seq.render(PatternStyle::Canonical),
            summary: seq.render(PatternStyle::UserFriendly),
            path: seq.path(),
            extension: seq.extension(),
            first_frame: seq.first_frame(),
            last_frame: seq.last_frame(),
            frames: seq.frame_indexes().keys().copied().collect(),
            files: seq.files().collect(),
            estimated_size: seq
                .settings()
                .estimate_size
                .then(|| seq.estimated_total_size()),
        }
    }
}

#[derive(Serialize)]
struct JsonRender<'a> {
    filename: &'a str,
}

fn to_json<T: Serialize>(value: &T) -> String {
    // Plain structs of strings and numbers always serialize.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn render_match(
    pattern: &str,
    found: &SequenceFromPattern,
    only_view: Option<u32>,
    format: OutputFormat,
    verbosity: u8,
    quiet: bool,
) -> String {
    match format {
        OutputFormat::Json => {
            let files = found
                .frames()
                .iter()
                .flat_map(|(frame, views)| {
                    views.iter().map(move |(view, path)| JsonFile {
                        frame: *frame,
                        view: *view,
                        path: path.as_str(),
                    })
                })
                .filter(|f| match (only_view, f.view) {
                    (Some(wanted), Some(v)) => wanted == v,
                    _ => true,
                })
                .collect::<Vec<_>>();
            to_json(&JsonMatch {
                pattern,
                count: files.len(),
                first_frame: found.first_frame(),
                last_frame: found.last_frame(),
                files,
            })
        }
        OutputFormat::Human => {
            let files = found.files(only_view);
            let mut out = String::new();
            if !quiet && verbosity > 0 {
                out.push_str(&format!("{pattern}: {} file(s)", files.len()));
                if let (Some(first), Some(last)) = (found.first_frame(), found.last_frame()) {
                    out.push_str(&format!(", frames {first}-{last}"));
                }
                out.push('\n');
            }
            for f in files {
                out.push_str(f);
                out.push('\n');
            }
            out
        }
    }
}

pub fn render_sequence(seq: &Sequence, format: OutputFormat, quiet: bool) -> String {
    match format {
        OutputFormat::Json => to_json(&JsonSequence::new(seq)),
        OutputFormat::Human => {
            if quiet {
                return format!("{}\n", seq.render(PatternStyle::Canonical));
            }
            human_sequence(seq)
        }
    }
}

pub fn render_scan(seqs: &[Sequence], format: OutputFormat, quiet: bool) -> String {
    match format {
        OutputFormat::Json => {
            let all: Vec<_> = seqs.iter().map(JsonSequence::new).collect();
            to_json(&all)
        }
        OutputFormat::Human => {
            let mut out = String::new();
            for seq in seqs {
                let style = if quiet {
                    PatternStyle::Canonical
                } else {
                    PatternStyle::UserFriendly
                };
                out.push_str(&seq.render(style));
                out.push('\n');
            }
            out
        }
    }
}

pub fn render_filename(filename: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&JsonRender { filename }),
        OutputFormat::Human => format!("{filename}\n"),
    }
}

fn human_sequence(seq: &Sequence) -> String {
    let mut out = String::new();
    out.push_str(&seq.render(PatternStyle::UserFriendly));
    out.push('\n');
    out.push_str(&format!("pattern: {}\n", seq.render(PatternStyle::Canonical)));
    out.push_str(&format!("files:   {}\n", seq.len()));
    if let (Some(first), Some(last)) = (seq.first_frame(), seq.last_frame()) {
        out.push_str(&format!("frames:  {first}-{last}\n"));
    }
    if seq.settings().estimate_size {
        out.push_str(&format!("size:    {} bytes\n", seq.estimated_total_size()));
    }
    out
}
