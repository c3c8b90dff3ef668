//! Emoji Finder - Command line entry point

mod cli;
mod clipboard;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use emoji_finder::FinderConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => FinderConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FinderConfig::default(),
    };

    match cli.command {
        Commands::Fetch { out_dir, url } => commands::fetch(&out_dir, &url),
        Commands::Inject { template, markup, out } => commands::inject(&template, &markup, &out),
        Commands::Search { keyword, data, copy, batch_size } => {
            if let Some(batch_size) = batch_size {
                config.render.batch_size = batch_size;
                config.validate()?;
            }
            commands::search(config, &keyword, data.as_deref(), copy)
        }
    }
}
