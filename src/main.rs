use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::Level;

use storefront_notify::app::App;
use storefront_notify::cli::Cli;
use storefront_notify::config::AppConfig;

/// The terminal is in raw mode while the app runs, so logs go to a file
fn init_logging() -> Result<()> {
    let path = AppConfig::log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing for logging
    if cli.debug {
        init_logging()?;
    }

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config
        .validate()
        .context("Invalid configuration after applying command line options")?;

    if cli.write_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => AppConfig::default_path()?,
        };
        config.save(&path)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }
    tracing::info!("Starting with theme '{}'", config.theme);

    let mut app = App::new(&config);
    app.run().await?;

    Ok(())
}
