//! CLI surface: argument parsing and output rendering.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "sdd-system",
    version,
    about = "Spec-driven development CLI - tech pack resolution, validation, and routing"
)]
pub struct Cli {
    /// Emit machine-readable JSON envelopes instead of human text
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override project root discovery
    #[arg(long, global = true, value_name = "DIR", env = "SDD_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}
