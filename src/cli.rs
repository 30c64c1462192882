use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed student schedule CLI.
/// Storage defaults to per-account files under ~/.campusbuddy,
/// or a specific store passed via --db.
#[derive(Parser)]
#[command(name = "cb", version, about = "Student task and class-schedule CLI")]
pub struct Cli {
    /// Path to the JSON store file (bypasses account selection).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Account to open; created on first use.
    #[arg(long, global = true)]
    pub account: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}
