//! CLI argument parsing for the cleanlink-optimizer binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "cleanlink-optimizer", about = "CleanLink single-vehicle route optimizer")]
pub struct Cli {
    /// Path to the optimize-request JSON file (reads stdin when omitted)
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Pretty-print the response JSON
    #[arg(long)]
    pub pretty: bool,
}
