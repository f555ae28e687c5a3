use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mirrorscan", about = "GitHub & Docker mirror discovery and validation")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover, validate and publish mirror lists
    Update {
        /// Source repos (comma-separated owner/name slugs or a file path)
        #[arg(short, long)]
        sources: Option<String>,
    },
    /// Show the last report
    Status,
}
