mod args;
mod render;

use crate::args::{Cli, Command};
use clap::Parser;
use frameseq_core::{
    DiscoverySettings, Error, LocalFs, files_from_pattern, sequence_from_file,
    sequences_in_directory,
};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// What a command printed and whether it found anything.
struct Outcome {
    output: String,
    found: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    let settings = DiscoverySettings {
        estimate_size: cli.estimate_size,
        max_gap: cli.max_gap,
    };
    tracing::debug!(?settings, command = ?cli.command, "starting");

    match run(&cli, settings) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            if outcome.found {
                ExitCode::from(0)
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("frameseq: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli, settings: DiscoverySettings) -> Result<Outcome, Error> {
    match &cli.command {
        Command::Match { pattern, view } => {
            let found = files_from_pattern(&LocalFs, pattern)?;
            let any = !found.files(*view).is_empty();
            Ok(Outcome {
                output: render::render_match(
                    pattern,
                    &found,
                    *view,
                    cli.format,
                    cli.verbosity,
                    cli.quiet,
                ),
                found: any,
            })
        }
        Command::Sequence { file } => {
            let seq = sequence_from_file(&LocalFs, file, settings)?;
            // A lone seed is still a result, but not a sequence.
            let found = seq.len() > 1;
            Ok(Outcome {
                output: render::render_sequence(&seq, cli.format, cli.quiet),
                found,
            })
        }
        Command::Scan { dir } => {
            let dir = dir.as_deref().unwrap_or(".");
            let seqs = sequences_in_directory(&LocalFs, dir, settings)?;
            Ok(Outcome {
                found: !seqs.is_empty(),
                output: render::render_scan(&seqs, cli.format, cli.quiet),
            })
        }
        Command::Render {
            pattern,
            frame,
            view,
        } => {
            if pattern.is_empty() {
                return Err(Error::EmptyPattern);
            }
            let filename = frameseq_pattern::render(pattern, *frame, *view)?;
            Ok(Outcome {
                output: render::render_filename(&filename, cli.format),
                found: true,
            })
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}
