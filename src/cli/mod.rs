//! CLI argument parsing for jobscript.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Jobscript: write cylc task job scripts from task-job descriptions.
///
/// A description (YAML or JSON) names the suite, task, batch system,
/// directives, environment and lifecycle hooks of one job submission.
#[derive(Parser, Debug)]
#[command(name = "jobscript")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log section assembly and file writes to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for jobscript.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a job script to disk.
    ///
    /// The script is written to a temporary sibling file, made executable
    /// and renamed over the destination.
    Write(WriteArgs),

    /// Print a job script to stdout without writing it.
    Render(RenderArgs),

    /// Quote values the way job scripts quote environment values.
    Quote(QuoteArgs),
}

/// Options shared by `write` and `render`.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Task-job description file (`.json` for JSON, otherwise YAML).
    pub description: PathBuf,

    /// Site configuration file (YAML). Built-in defaults are used if absent.
    #[arg(long, value_name = "FILE")]
    pub site_config: Option<PathBuf>,

    /// Export CYLC_DEBUG=true in the job.
    #[arg(long)]
    pub debug: bool,
}

/// Arguments for the `write` command.
#[derive(Args, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Destination job script path.
    pub destination: PathBuf,

    /// Run `bash -n` on the script before moving it into place.
    #[arg(long)]
    pub check_syntax: bool,
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `quote` command.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Values to quote, one result per line.
    #[arg(required = true)]
    pub values: Vec<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
