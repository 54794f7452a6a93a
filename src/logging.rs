//! Tracing subscriber setup.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::RunMode;
use crate::config::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Build the `EnvFilter`; `RUST_LOG` takes precedence over the configured level
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Where log lines go.
///
/// The TUI owns stdout, so interactive runs log to the configured file or
/// nowhere. Daemon runs log to stderr, leaving stdout to the publisher.
fn build_writer(config: &LoggingConfig, mode: RunMode) -> Result<(BoxMakeWriter, bool)> {
    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(ConfigError::ReadError)?;
        return Ok((BoxMakeWriter::new(Mutex::new(file)), false));
    }

    match mode {
        RunMode::Interactive => Ok((BoxMakeWriter::new(std::io::sink), false)),
        RunMode::Daemon => Ok((
            BoxMakeWriter::new(std::io::stderr),
            atty::is(atty::Stream::Stderr),
        )),
    }
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig, mode: RunMode) -> Result<()> {
    let (writer, is_terminal) = build_writer(config, mode)?;
    let filter = build_filter(&config.level);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.colored && is_terminal).try_init()
    };

    installed.map_err(|e| ConfigError::invalid("logging", e.to_string()))?;
    Ok(())
}
