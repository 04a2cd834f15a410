use clap::{Parser, Subcommand, ValueEnum};

use frameseq_core::DEFAULT_MAX_GAP;

/// frameseq: find and describe numbered file sequences.
#[derive(Debug, Parser)]
#[command(name = "frameseq")]
#[command(about = "Find and describe numbered file sequences", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub format: OutputFormat,

    /// Quiet output (print only filenames or patterns)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbosity (-v, -vv, -vvv); RUST_LOG overrides it
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Sum the sizes of sequence members
    #[arg(long, global = true)]
    pub estimate_size: bool,

    /// Missing frames tolerated between two listed ranges
    #[arg(long, default_value_t = DEFAULT_MAX_GAP, global = true)]
    pub max_gap: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the files matching a pattern such as `shot_%v.####.exr`
    Match {
        pattern: String,

        /// Keep only this view (files without a view are always kept)
        #[arg(long)]
        view: Option<u32>,
    },

    /// Find the sequence a file belongs to
    Sequence { file: String },

    /// Group every file of a directory into sequences
    Scan {
        /// Directory to scan (defaults to current directory)
        dir: Option<String>,
    },

    /// Print the filename a pattern gives for one frame
    Render {
        pattern: String,

        #[arg(long)]
        frame: u64,

        #[arg(long, default_value_t = 0)]
        view: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}
