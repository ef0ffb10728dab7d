mod shell;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use rednotebook_config::AppConfig;
use rednotebook_core::Session;

use crate::shell::EditMenu;

/// A journal editor with per-day undo and redo.
#[derive(Parser, Debug)]
#[command(name = "rednotebook", version, about)]
struct Cli {
    /// Configuration file (defaults to the data directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Day to open, as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Template directory, overriding the configuration.
    #[arg(long)]
    templates: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting rednotebook");

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let first_start = !config_path.exists();
    let mut config = AppConfig::load_or_create(&config_path);
    if let Some(dir) = cli.templates {
        config.template_dir = dir.display().to_string();
    }

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let menu = EditMenu::default();
    let mut session = Session::from_config(&config, date, menu.clone());

    if let Err(e) = session.templates().ensure_defaults(first_start) {
        tracing::warn!("Failed to write default templates: {e:#}");
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    shell::run(&mut session, &menu, stdin.lock(), &mut stdout).context("Shell failed")?;

    tracing::info!("Exiting rednotebook");
    Ok(())
}
