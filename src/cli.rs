use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Storefront demo with single-slot toast notifications
#[derive(Parser, Debug)]
#[command(name = "storefront-notify")]
#[command(about = "Storefront terminal demo of animated toast notifications")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging to the log file
    #[arg(long)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show and hide toasts without animating
    #[arg(long)]
    pub reduce_motion: bool,

    /// Default auto-dismiss delay in milliseconds (0 keeps toasts until dismissed)
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Animation frame rate (1-60)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=60))]
    pub fps: Option<u32>,

    /// Colour theme (gruvbox-dark, professional-light, high-contrast)
    #[arg(long)]
    pub theme: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Apply command line overrides on top of the file configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if self.reduce_motion {
            config.notifications.reduce_motion = true;
        }
        if let Some(duration_ms) = self.duration_ms {
            config.notifications.default_duration_ms = duration_ms;
        }
        if let Some(fps) = self.fps {
            config.notifications.max_fps = fps;
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
    }
}
