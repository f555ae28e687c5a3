mod cli;
mod commands;
mod pipeline;
mod seeds;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use mirrorscan_core::config::AppConfig;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using defaults");
        include_str!("../config/default.toml").to_string()
    });
    let mut config: AppConfig = toml::from_str(&config_str)?;

    // Environment variable overrides for worker tuning
    let parse_workers =
        |v: &str| -> Option<usize> { v.parse::<usize>().ok().filter(|&n| n > 0 && n <= 64) };
    if let Ok(v) = std::env::var("GITHUB_WORKERS") {
        if let Some(n) = parse_workers(&v) {
            config.github.workers = n;
        }
    }
    if let Ok(v) = std::env::var("DOCKER_WORKERS") {
        if let Some(n) = parse_workers(&v) {
            config.docker.workers = n;
        }
    }

    match cli.command {
        Commands::Update { sources } => {
            pipeline::run_update(config, sources).await?;
        }
        Commands::Status => {
            commands::status::run(config)?;
        }
    }

    Ok(())
}
