//! Custom error types for the sensor dashboard.
//!
//! This module defines domain-specific error types using thiserror,
//! providing clear error messages and proper error context propagation.

use thiserror::Error;

/// Errors raised while wiring channels to their display surfaces and charts
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Display surface not found: {0}")]
    SurfaceNotFound(String),

    #[error("Chart not initialized for channel: {0}")]
    ChartNotInitialized(String),

    #[error("Duplicate channel id: {0}")]
    DuplicateChannel(String),

    #[error("No channels configured")]
    NoChannels,
}

/// Errors related to application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Errors related to the UI
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Terminal rendering failed: {0}")]
    RenderError(String),

    #[error("Input handling failed: {0}")]
    InputError(String),
}

/// Errors related to service/daemon operations
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service initialization failed: {0}")]
    InitializationError(String),

    #[error("Signal handling error: {0}")]
    SignalError(String),

    #[error("Publish failed: {0}")]
    PublishError(String),
}

/// Application-level errors that can wrap other error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] DashboardError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid("service.window_size", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Invalid value for service.window_size: must be greater than 0"
        );
    }

    #[test]
    fn test_app_error_wraps_dashboard_error() {
        let err: AppError = DashboardError::SurfaceNotFound("humidity".to_string()).into();
        assert!(matches!(err, AppError::Dashboard(_)));
        assert_eq!(
            err.to_string(),
            "Dashboard error: Display surface not found: humidity"
        );
    }
}
