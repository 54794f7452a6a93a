//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure and parsing logic using gumdrop,
//! supporting different run modes and configuration options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use gumdrop::Options;

/// Run mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Interactive terminal UI mode (default)
    Interactive,
    /// Background daemon mode (no UI, readings on stdout)
    Daemon,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Interactive => "interactive",
            RunMode::Daemon => "daemon",
        }
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" | "tui" => Ok(RunMode::Interactive),
            "daemon" | "headless" => Ok(RunMode::Daemon),
            other => Err(format!("unknown run mode '{}' (expected interactive or daemon)", other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert LogLevel to an `EnvFilter` directive
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Sensor dashboard: simulated sensor readings with live charts
#[derive(Debug, Options)]
pub struct Cli {
    /// Print help message
    #[options(short = "h")]
    pub help: bool,

    /// Print version and exit
    #[options(short = "V")]
    pub version: bool,

    /// Path to configuration file (default: config.toml if present)
    #[options(short = "c", meta = "PATH")]
    pub config: Option<PathBuf>,

    /// Run mode: interactive or daemon
    #[options(short = "m", meta = "MODE")]
    pub mode: Option<RunMode>,

    /// Log level: trace, debug, info, warn, error
    #[options(short = "l", meta = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Update interval in milliseconds (overrides config file)
    #[options(short = "i", meta = "MS")]
    pub update_interval_ms: Option<u64>,

    /// Number of points kept per chart (overrides config file)
    #[options(short = "w", meta = "N")]
    pub window_size: Option<usize>,

    /// Seed for reproducible readings
    #[options(short = "s", meta = "SEED")]
    pub seed: Option<u64>,

    /// Stop the daemon after this many ticks
    #[options(short = "n", meta = "N")]
    pub ticks: Option<u64>,

    /// Write the sensor map as SVG to PATH and exit
    #[options(no_short, meta = "PATH")]
    pub export_map: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[options(no_short)]
    pub dump_config: bool,
}

impl Cli {
    /// Parse process arguments, printing usage and exiting on error or `--help`
    pub fn parse_args() -> Self {
        Self::parse_args_default_or_exit()
    }

    /// Parse an explicit argument list (without the program name)
    #[cfg(test)]
    pub fn parse_from<S: AsRef<str>>(args: &[S]) -> Result<Self, gumdrop::Error> {
        Self::parse_args_default(args)
    }
}
