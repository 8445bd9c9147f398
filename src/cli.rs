use clap::Parser;
use std::path::PathBuf;

/// Soiree - terminal admin client for party event records
#[derive(Parser, Debug)]
#[command(name = "soiree")]
#[command(about = "A TUI admin client for parties, guests, and RSVPs")]
#[command(version)]
pub struct Cli {
    /// Base URL of the party data service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Cohort path segment used by the data service
    #[arg(long)]
    pub cohort: Option<String>,

    /// Path to the config file (defaults to the user config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
