use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed to-do manager.
/// State lives in ~/.daylist (one JSON file per slice) or a directory
/// passed via --data-dir.
#[derive(Parser)]
#[command(name = "daylist", version, about = "Date-bucketed to-do list manager")]
pub struct Cli {
    /// Directory holding the persisted state.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
