mod action;
mod app;
mod async_diff;
mod cli;
mod components;
mod config;
mod diff;
mod event;
mod highlight;
mod source;
mod state;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cli::Cli;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

fn default_log_path() -> PathBuf {
    let mut path = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
    path.push("codediff");
    path.push("codediff.log");
    path
}

/// Logs go to a file; the terminal belongs to the TUI.
fn init_logging(cli: &Cli) -> Result<()> {
    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("opening log file {}", path.display()))?;

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();
    init_logging(&cli)?;

    let pairs = cli.file_sources()?;
    tracing::info!(pairs = pairs.len(), "starting");

    // Load config, apply CLI overrides
    let mut config = config::load_config();
    config.apply_cli(&cli);

    let mut app = App::new(pairs, config);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "exited with error");
        eprintln!("codediff: {e:#}");
    }

    result
}
