//! lrcsync CLI entry point.

use anyhow::Result;
use clap::Parser;
use lrcsync::cli::{commands, Cli, Commands};
use lrcsync::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match &cli.config {
        Some(path) => Settings::expand_path(path),
        None => Settings::default_config_path(),
    };
    let settings = Settings::load_from(Some(config_path.as_path()))?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("lrcsync={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Show { file, json } => {
            commands::run_show(file, *json, &settings).await?;
        }

        Commands::Detect { file } => {
            commands::run_detect(file, &settings)?;
        }

        Commands::At { file, time } => {
            commands::run_at(file, time, &settings)?;
        }

        Commands::Locate { note, line } => {
            commands::run_locate(note, *line, &settings)?;
        }

        Commands::Follow {
            file,
            sentence,
            no_scroll,
            start,
        } => {
            commands::run_follow(file, *sentence, *no_scroll, start.as_deref(), &settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
