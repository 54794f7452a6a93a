//! Sensor dashboard entry point.
//!
//! Startup order:
//! 1. Parse the command line and load the layered configuration.
//! 2. Install the tracing subscriber for the chosen run mode.
//! 3. Handle one-shot commands (`--dump-config`, `--export-map`).
//! 4. Build the dashboard service; any missing surface or chart aborts here.
//! 5. Run the interactive TUI or the headless daemon until shutdown.

use std::path::PathBuf;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

mod chart;
mod cli;
mod config;
mod dashboard;
mod error;
mod logging;
mod map;
mod publisher;
mod sensors;
mod series;
mod service;
mod ui;

use cli::{Cli, RunMode};
use config::AppConfig;
use map::MapDiagram;
use publisher::{NoOpPublisher, publisher_for};
use service::DashboardService;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    if cli.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (config_path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let mut config = AppConfig::load(&config_path, required)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    config.apply_cli_overrides(&cli);
    config.validate().context("invalid command-line override")?;

    let mut mode = config.run_mode();
    if mode == RunMode::Interactive && !atty::is(atty::Stream::Stdout) {
        mode = RunMode::Daemon;
    }

    logging::init_logging(&config.logging, mode).context("initializing logging")?;
    tracing::info!(
        config = %config_path.display(),
        mode = %mode,
        channels = config.channels.len(),
        "Configuration loaded"
    );

    if cli.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if let Some(path) = &cli.export_map {
        MapDiagram::sensor_map()
            .export_svg(path)
            .with_context(|| format!("writing map to {}", path.display()))?;
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let signals = service::spawn_signal_handler(cancel.clone())?;

    let result = match mode {
        RunMode::Interactive => {
            let mut service = DashboardService::from_config(&config, Box::new(NoOpPublisher))?;
            ui::run(&mut service, &cancel).await
        }
        RunMode::Daemon => {
            let publisher = publisher_for(&config.service.output);
            let mut service = DashboardService::from_config(&config, publisher)?;
            service.run_daemon(&cancel, cli.ticks).await
        }
    };

    cancel.cancel();
    let _ = signals.await;

    result?;
    Ok(())
}
