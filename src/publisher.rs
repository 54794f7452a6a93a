//! Publisher abstraction for tick readings.
//!
//! In daemon mode there is no screen to write display surfaces to, so each
//! tick's readings are handed to a [`Publisher`] instead.

use std::io::Write;
use std::sync::Mutex;

use crate::dashboard::TickReport;
use crate::error::{Result, ServiceError};

/// Trait for publishing tick readings
#[cfg_attr(test, mockall::automock)]
pub trait Publisher: Send + Sync {
    fn publish(&self, report: &TickReport) -> Result<()>;
}

/// Writes one JSON document per tick, newline delimited
pub struct JsonLinesPublisher<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the publisher and return the underlying writer
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Publisher for JsonLinesPublisher<W> {
    fn publish(&self, report: &TickReport) -> Result<()> {
        let line = serde_json::to_string(report)
            .map_err(|e| ServiceError::PublishError(e.to_string()))?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ServiceError::PublishError("writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// Logging publisher that logs readings instead of printing them
pub struct LoggingPublisher;

impl Publisher for LoggingPublisher {
    fn publish(&self, report: &TickReport) -> Result<()> {
        tracing::info!(tick = report.tick, channels = report.readings.len(), "Tick");
        for reading in &report.readings {
            tracing::info!(channel = %reading.channel, value = reading.value, "  {}", reading.display);
        }
        Ok(())
    }
}

/// No-op publisher for when output is disabled
pub struct NoOpPublisher;

impl Publisher for NoOpPublisher {
    fn publish(&self, _report: &TickReport) -> Result<()> {
        Ok(())
    }
}

/// Publisher for the `service.output` setting
pub fn publisher_for(output: &str) -> Box<dyn Publisher> {
    match output {
        "log" => Box::new(LoggingPublisher),
        "none" => Box::new(NoOpPublisher),
        _ => Box::new(JsonLinesPublisher::new(std::io::stdout())),
    }
}
