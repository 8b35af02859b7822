use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for news-notify.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Yaml config file
    #[arg(short, long)]
    pub config: PathBuf,
}
