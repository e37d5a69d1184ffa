mod app;

use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, IsTerminal},
    sync::Mutex,
};

use anyhow::{Context, Result};
use railres_core::{
    config::{self, AppConfig},
    ReservationManager,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    init_logging()?;

    let config_path = config::ensure_default_config()?;
    let config = AppConfig::load()?;
    let manager = ReservationManager::from_config(&config)
        .with_context(|| format!("invalid train catalog in {}", config_path.display()))?;
    info!(
        "loaded {} trains, first ticket id {}",
        manager.trains().len(),
        config.ticket_id_base
    );

    let stdout = io::stdout();
    let styled = stdout.is_terminal() && env::var_os("NO_COLOR").is_none();
    let mut app = app::App::new(manager, io::stdin().lock(), stdout.lock(), styled);
    app.run()
}

fn init_logging() -> Result<()> {
    let log_dir = env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("railres.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::from_default_env();

    // stdout carries the menu, so console logs go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
