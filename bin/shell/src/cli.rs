//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Replay a script of editor commands and write the saved workflow.
///
/// Paths given here override the configuration file and `FLOWDECK_*`
/// environment variables.
#[derive(Parser, Debug, Default)]
#[command(name = "flowdeck")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file. Defaults to ./flowdeck.toml when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON array of node type definitions
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Saved workflow to open
    #[arg(long)]
    pub workflow: Option<PathBuf>,

    /// JSON array of editor commands
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Where to write the saved workflow (stdout when unset)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
