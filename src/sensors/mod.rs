//! Sensor channels and the samples they produce.
//!
//! A [`Channel`] is one monitored quantity (temperature, humidity, ...)
//! together with the range its simulated readings are drawn from, the
//! bounds of its chart axis and the way its value is shown on screen.

use chrono::{DateTime, Local, Timelike};
use serde::Serialize;

use crate::config::ChannelConfig;

pub mod generator;

pub use generator::{RandomSource, SampleSource};

#[cfg(test)]
pub use generator::MockSampleSource;

/// How a channel's value is rendered on its display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Fixed-point with the given number of decimals
    Fixed(u8),
    /// Integer part only (floor), for discrete quantities
    Truncate,
}

impl ValueFormat {
    /// Format a raw value, without unit suffix. Ties round away from zero.
    pub fn render(&self, value: f64) -> String {
        match self {
            ValueFormat::Fixed(decimals) => {
                let scale = 10f64.powi(i32::from(*decimals));
                let rounded = (value * scale).round() / scale;
                format!("{:.*}", *decimals as usize, rounded)
            }
            ValueFormat::Truncate => format!("{}", value.floor() as i64),
        }
    }

    /// The numeric value a reader sees once the value has been rendered.
    ///
    /// Parsing the rendered text keeps the chart point and the display
    /// text identical, including at rounding boundaries.
    pub fn quantize(&self, value: f64) -> f64 {
        self.render(value).parse().unwrap_or(value)
    }
}

/// A single monitored quantity
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Identifier of the channel's display surface
    pub id: String,
    /// Human readable label, also used as the chart title
    pub label: String,
    /// Lower bound (inclusive) of simulated readings
    pub sample_min: f64,
    /// Upper bound (exclusive) of simulated readings
    pub sample_max: f64,
    /// Fixed chart axis bounds
    pub axis_min: f64,
    pub axis_max: f64,
    pub format: ValueFormat,
    /// Appended verbatim to the rendered value, e.g. `"°C"` or `" dB"`
    pub suffix: String,
    /// Chart line color as `#RRGGBB`
    pub color: String,
}

impl Channel {
    pub fn from_config(config: &ChannelConfig) -> Self {
        let format = match config.format {
            crate::config::FormatKind::Fixed => ValueFormat::Fixed(config.decimals),
            crate::config::FormatKind::Truncate => ValueFormat::Truncate,
        };

        Self {
            id: config.id.clone(),
            label: config.label.clone(),
            sample_min: config.sample_min,
            sample_max: config.sample_max,
            axis_min: config.axis_min,
            axis_max: config.axis_max,
            format,
            suffix: config.suffix.clone(),
            color: config.color.clone(),
        }
    }

    /// Render a value the way it appears on the display surface
    pub fn format_value(&self, value: f64) -> String {
        format!("{}{}", self.format.render(value), self.suffix)
    }

    /// Draw one reading for this channel from `source`
    pub fn draw(&self, source: &mut dyn SampleSource) -> f64 {
        source.next_in_range(self.sample_min, self.sample_max)
    }
}

/// One observation for a channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Local>,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Local>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Wall-clock label, `H:M:S` without zero padding
    pub fn label(&self) -> String {
        time_label(&self.timestamp)
    }
}

pub fn time_label(timestamp: &DateTime<Local>) -> String {
    format!(
        "{}:{}:{}",
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second()
    )
}
