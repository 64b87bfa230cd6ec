mod print;
mod prompt;
mod terminal;

use std::{
    fs::{self, File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use anyhow::{Context, Result};
use drawnumber_core::{AppConfig, DrawNumberApp, DrawNumberView};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{print::PrintView, terminal::TerminalView};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = AppConfig::load()?;
    init_logging(&settings.log_dir)?;
    info!(game_config = %settings.game_config.display(), "Starting drawnumber");

    let transcript = open_append(&settings.log_dir.join("results.log"))?;
    let views: Vec<Box<dyn DrawNumberView>> = vec![
        Box::new(TerminalView::new()),
        Box::new(PrintView::new(transcript)),
    ];

    DrawNumberApp::from_config_file(&settings.game_config, views)?
        .run()
        .await
}

fn init_logging(log_dir: &Path) -> Result<()> {
    let log_file = open_append(&log_dir.join("drawnumber.log"))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))
}
