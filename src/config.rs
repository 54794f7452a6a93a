//! Application configuration management.
//!
//! Configuration is layered with the `config` crate: built-in defaults, an
//! optional TOML file, `SENSOR_DASHBOARD__*` environment variables, and
//! finally command-line overrides.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::parse_hex_color;
use crate::cli::{Cli, LogLevel, RunMode};
use crate::error::{ConfigError, Result};
use crate::series::DEFAULT_WINDOW_SIZE;

/// Prefix of environment overrides, e.g. `SENSOR_DASHBOARD__SERVICE__WINDOW_SIZE=20`
pub const ENV_PREFIX: &str = "SENSOR_DASHBOARD";

/// Top-level application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelConfig>,
}

/// Service runtime configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_run_mode")]
    pub run_mode: String,
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Headless output: `json`, `log` or `none`
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default = "default_true")]
    pub colored: bool,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Rendering style of a channel value
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Fixed,
    Truncate,
}

/// One sensor channel
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChannelConfig {
    pub id: String,
    pub label: String,
    pub sample_min: f64,
    pub sample_max: f64,
    pub axis_min: f64,
    pub axis_max: f64,
    #[serde(default = "default_format")]
    pub format: FormatKind,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "default_color")]
    pub color: String,
}

// Default value functions
fn default_run_mode() -> String {
    "interactive".to_string()
}

fn default_update_interval() -> u64 {
    5000
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_output() -> String {
    "json".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_format() -> FormatKind {
    FormatKind::Fixed
}

fn default_decimals() -> u8 {
    1
}

fn default_color() -> String {
    "#4CAF50".to_string()
}

/// The four channels of the demo page
pub fn default_channels() -> Vec<ChannelConfig> {
    let channel = |id: &str, label: &str, sample: (f64, f64), axis: (f64, f64), format: FormatKind, suffix: &str| {
        ChannelConfig {
            id: id.to_string(),
            label: label.to_string(),
            sample_min: sample.0,
            sample_max: sample.1,
            axis_min: axis.0,
            axis_max: axis.1,
            format,
            decimals: default_decimals(),
            suffix: suffix.to_string(),
            color: default_color(),
        }
    };

    vec![
        channel("temperature", "Temperature (°C)", (20.0, 30.0), (0.0, 40.0), FormatKind::Fixed, "°C"),
        channel("humidity", "Humidity (%)", (30.0, 70.0), (0.0, 100.0), FormatKind::Fixed, "%"),
        channel("airQuality", "Air Quality (AQI)", (0.0, 500.0), (0.0, 500.0), FormatKind::Truncate, ""),
        channel("noiseLevel", "Noise Level (dB)", (30.0, 90.0), (0.0, 120.0), FormatKind::Truncate, " dB"),
    ]
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            run_mode: default_run_mode(),
            update_interval_ms: default_update_interval(),
            window_size: default_window_size(),
            output: default_output(),
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            colored: true,
            format: default_log_format(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            logging: LoggingConfig::default(),
            channels: default_channels(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus environment overrides
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if required && !path.exists() {
            return Err(ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))
            .into());
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::from)?;

        let config: AppConfig = settings.try_deserialize().map_err(ConfigError::from)?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.service.update_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "service.update_interval_ms",
                "must be greater than 0",
            )
            .into());
        }

        if self.service.window_size == 0 {
            return Err(ConfigError::invalid("service.window_size", "must be greater than 0").into());
        }

        self.service
            .run_mode
            .parse::<RunMode>()
            .map_err(|e| ConfigError::invalid("service.run_mode", e))?;

        if !matches!(self.service.output.as_str(), "json" | "log" | "none") {
            return Err(ConfigError::invalid("service.output", "must be json, log or none").into());
        }

        self.logging
            .level
            .parse::<LogLevel>()
            .map_err(|e| ConfigError::invalid("logging.level", e))?;

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::invalid("logging.format", "must be text or json").into());
        }

        if self.channels.is_empty() {
            return Err(ConfigError::invalid("channels", "at least one channel is required").into());
        }

        let mut seen = HashSet::new();
        for channel in &self.channels {
            channel.validate()?;
            if !seen.insert(channel.id.as_str()) {
                return Err(ConfigError::invalid(
                    format!("channels.{}", channel.id),
                    "duplicate channel id",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(mode) = cli.mode {
            self.service.run_mode = mode.as_str().to_string();
        }

        if let Some(interval) = cli.update_interval_ms {
            self.service.update_interval_ms = interval;
        }

        if let Some(window_size) = cli.window_size {
            self.service.window_size = window_size;
        }

        if let Some(seed) = cli.seed {
            self.service.seed = Some(seed);
        }

        if let Some(level) = cli.log_level {
            self.logging.level = level.as_str().to_string();
        }
    }

    /// Effective run mode, already checked by `validate`
    pub fn run_mode(&self) -> RunMode {
        self.service.run_mode.parse().unwrap_or(RunMode::Interactive)
    }

    /// Serialize the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }
}

impl ChannelConfig {
    fn validate(&self) -> Result<()> {
        let field = |name: &str| format!("channels.{}.{}", self.id, name);

        if self.id.trim().is_empty() {
            return Err(ConfigError::invalid("channels.id", "cannot be empty").into());
        }

        if self.sample_min > self.sample_max {
            return Err(ConfigError::invalid(field("sample_min"), "must not exceed sample_max").into());
        }

        if self.axis_min >= self.axis_max {
            return Err(ConfigError::invalid(field("axis_min"), "must be below axis_max").into());
        }

        if parse_hex_color(&self.color).is_none() {
            return Err(ConfigError::invalid(field("color"), "expected #RRGGBB").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config_with_suffix(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        write_config_with_suffix(contents, ".toml")
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service.update_interval_ms, 5000);
        assert_eq!(config.service.window_size, 10);
        assert_eq!(config.channels.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_channel_ids() {
        let ids: Vec<String> = default_channels().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["temperature", "humidity", "airQuality", "noiseLevel"]);
    }

    #[test]
    fn test_validate_zero_update_interval() {
        let mut config = AppConfig::default();
        config.service.update_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_window() {
        let mut config = AppConfig::default();
        config.service.window_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_channel() {
        let mut config = AppConfig::default();
        config.channels[1].id = "temperature".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_inverted_ranges() {
        let mut config = AppConfig::default();
        config.channels[0].sample_min = 40.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.channels[0].axis_max = config.channels[0].axis_min;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_color() {
        let mut config = AppConfig::default();
        config.channels[2].color = "green".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_optional_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml"), false).unwrap();
        assert_eq!(config.channels.len(), 4);
        assert_eq!(config.run_mode(), RunMode::Interactive);
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(&dir.path().join("nope.toml"), true).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r##"
[service]
run_mode = "daemon"
update_interval_ms = 250
window_size = 20

[[channels]]
id = "pressure"
label = "Pressure (hPa)"
sample_min = 980.0
sample_max = 1040.0
axis_min = 950.0
axis_max = 1050.0
format = "truncate"
suffix = " hPa"
color = "#2196F3"
"##,
        );

        let config = AppConfig::load(file.path(), true).unwrap();
        assert_eq!(config.run_mode(), RunMode::Daemon);
        assert_eq!(config.service.update_interval_ms, 250);
        assert_eq!(config.service.window_size, 20);
        assert_eq!(config.channels.len(), 1);
        assert_eq!(config.channels[0].format, FormatKind::Truncate);
        assert_eq!(config.channels[0].decimals, 1);
    }

    #[test]
    fn test_load_file_without_toml_extension() {
        let file = write_config_with_suffix("[service]\nupdate_interval_ms = 250\n", ".conf");
        let config = AppConfig::load(file.path(), true).unwrap();
        assert_eq!(config.service.update_interval_ms, 250);
        assert_eq!(config.channels.len(), 4);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
        let config = AppConfig::load(&path, true).unwrap();
        let defaults = default_channels();
        assert_eq!(config.channels.len(), defaults.len());
        for (loaded, default) in config.channels.iter().zip(&defaults) {
            assert_eq!(loaded.id, default.id);
            assert_eq!(loaded.suffix, default.suffix);
            assert_eq!(loaded.format, default.format);
            assert_eq!((loaded.axis_min, loaded.axis_max), (default.axis_min, default.axis_max));
        }
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let file = write_config("[service]\nupdate_interval_ms = 0\n");
        assert!(AppConfig::load(file.path(), true).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(&["--mode", "daemon", "-i", "100", "--window-size", "3", "--seed", "9"])
            .unwrap();
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&cli);
        assert_eq!(config.run_mode(), RunMode::Daemon);
        assert_eq!(config.service.update_interval_ms, 100);
        assert_eq!(config.service.window_size, 3);
        assert_eq!(config.service.seed, Some(9));
    }

    #[test]
    fn test_toml_dump_parses_back() {
        let dumped = AppConfig::default().to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&dumped).unwrap();
        assert_eq!(parsed.channels.len(), 4);
        assert_eq!(parsed.channels[3].suffix, " dB");
    }
}
