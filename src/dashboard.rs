//! Dashboard context.
//!
//! Owns every channel's display surface, series buffer and chart, and
//! advances them together one tick at a time.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::chart::{ChartBoard, ChartView};
use crate::config::AppConfig;
use crate::error::{DashboardError, Result};
use crate::sensors::{Channel, SampleSource};
use crate::series::SeriesBuffer;

/// Text shown on a display surface before the first tick
pub const PLACEHOLDER: &str = "--";

/// One channel's reading within a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub channel: String,
    pub display: String,
    pub value: f64,
}

/// Everything produced by one tick
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub timestamp: DateTime<Local>,
    pub readings: Vec<Reading>,
}

pub struct Dashboard {
    channels: Vec<Channel>,
    surfaces: HashMap<String, String>,
    buffers: HashMap<String, SeriesBuffer>,
    charts: ChartBoard,
    ticks: u64,
}

impl Dashboard {
    /// Build the context for a fixed set of channels
    pub fn new(channels: Vec<Channel>, window_size: usize) -> Result<Self> {
        if channels.is_empty() {
            return Err(DashboardError::NoChannels.into());
        }

        let mut seen = HashSet::new();
        for channel in &channels {
            if !seen.insert(channel.id.as_str()) {
                return Err(DashboardError::DuplicateChannel(channel.id.clone()).into());
            }
        }

        let surfaces = channels
            .iter()
            .map(|c| (c.id.clone(), PLACEHOLDER.to_string()))
            .collect();
        let buffers = channels
            .iter()
            .map(|c| (c.id.clone(), SeriesBuffer::new(window_size)))
            .collect();
        let charts = ChartBoard::new(&channels)?;

        let dashboard = Self {
            channels,
            surfaces,
            buffers,
            charts,
            ticks: 0,
        };

        tracing::debug!(
            channels = dashboard.channels.len(),
            window_size,
            "Dashboard initialized"
        );
        Ok(dashboard)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let channels = config.channels.iter().map(Channel::from_config).collect();
        Self::new(channels, config.service.window_size)
    }

    /// Draw one sample per channel, show it, record it and redraw its chart
    pub fn tick(&mut self, now: DateTime<Local>, source: &mut dyn SampleSource) -> Result<TickReport> {
        self.ticks += 1;
        let mut readings = Vec::with_capacity(self.channels.len());

        for channel in &self.channels {
            let raw = channel.draw(source);
            let shown = channel.format_value(raw);
            let value = channel.format.quantize(raw);

            let surface = self
                .surfaces
                .get_mut(&channel.id)
                .ok_or_else(|| DashboardError::SurfaceNotFound(channel.id.clone()))?;
            surface.clone_from(&shown);

            let buffer = self
                .buffers
                .get_mut(&channel.id)
                .ok_or_else(|| DashboardError::ChartNotInitialized(channel.id.clone()))?;
            buffer.append(now, value);
            self.charts.update(&channel.id, &buffer.snapshot())?;

            tracing::trace!(channel = %channel.id, raw, shown = %shown, "Sample drawn");
            readings.push(Reading {
                channel: channel.id.clone(),
                display: shown,
                value,
            });
        }

        Ok(TickReport {
            tick: self.ticks,
            timestamp: now,
            readings,
        })
    }

    /// Empty every series and repaint the charts
    pub fn clear_history(&mut self) -> Result<()> {
        for channel in &self.channels {
            if let Some(buffer) = self.buffers.get_mut(&channel.id) {
                buffer.clear();
            }
            self.charts.update(&channel.id, &[])?;
        }
        Ok(())
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Current text of a display surface
    pub fn display(&self, channel_id: &str) -> Result<&str> {
        self.surfaces
            .get(channel_id)
            .map(String::as_str)
            .ok_or_else(|| DashboardError::SurfaceNotFound(channel_id.to_string()).into())
    }

    pub fn buffer(&self, channel_id: &str) -> Result<&SeriesBuffer> {
        self.buffers
            .get(channel_id)
            .ok_or_else(|| DashboardError::ChartNotInitialized(channel_id.to_string()).into())
    }

    pub fn chart(&self, channel_id: &str) -> Result<&ChartView> {
        Ok(self.charts.view(channel_id)?)
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::sensors::{MockSampleSource, RandomSource};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn dashboard() -> Dashboard {
        Dashboard::from_config(&AppConfig::default()).unwrap()
    }

    #[test]
    fn test_surfaces_start_with_placeholder() {
        let dash = dashboard();
        for channel in dash.channels() {
            assert_eq!(dash.display(&channel.id).unwrap(), PLACEHOLDER);
            assert!(dash.buffer(&channel.id).unwrap().is_empty());
        }
    }

    #[test]
    fn test_tick_formats_each_channel() {
        let mut dash = dashboard();
        let mut source = MockSampleSource::new();
        source
            .expect_next_in_range()
            .returning(|min, _max| match min as i64 {
                20 => 23.456,
                30 => 61.2,
                _ => 217.9,
            });

        let report = dash.tick(start(), &mut source).unwrap();

        assert_eq!(report.tick, 1);
        assert_eq!(dash.display("temperature").unwrap(), "23.5°C");
        assert_eq!(dash.display("humidity").unwrap(), "61.2%");
        assert_eq!(dash.display("airQuality").unwrap(), "217");
        assert_eq!(dash.display("noiseLevel").unwrap(), "61 dB");

        let air = &report.readings[2];
        assert_eq!(air.channel, "airQuality");
        assert_eq!(air.display, "217");
        assert_eq!(air.value, 217.0);
        assert_eq!(dash.chart("airQuality").unwrap().values(), &[217.0]);
    }

    #[test]
    fn test_each_channel_uses_its_own_range() {
        let mut dash = dashboard();
        let mut source = MockSampleSource::new();
        source
            .expect_next_in_range()
            .withf(|min, max| (*min, *max) == (20.0, 30.0))
            .times(1)
            .returning(|min, _| min);
        source
            .expect_next_in_range()
            .withf(|min, max| (*min, *max) == (30.0, 70.0))
            .times(1)
            .returning(|min, _| min);
        source
            .expect_next_in_range()
            .withf(|min, max| (*min, *max) == (0.0, 500.0))
            .times(1)
            .returning(|min, _| min);
        source
            .expect_next_in_range()
            .withf(|min, max| (*min, *max) == (30.0, 90.0))
            .times(1)
            .returning(|min, _| min);

        dash.tick(start(), &mut source).unwrap();
    }

    #[test]
    fn test_eleven_ticks_evict_the_first_sample() {
        let mut dash = dashboard();
        let mut source = RandomSource::new(Some(3));

        for i in 0..11 {
            dash.tick(start() + Duration::seconds(5 * i), &mut source)
                .unwrap();
        }

        assert_eq!(dash.tick_count(), 11);
        for channel in dash.channels() {
            let snapshot = dash.buffer(&channel.id).unwrap().snapshot();
            assert_eq!(snapshot.len(), 10);
            assert_eq!(snapshot[0].timestamp, start() + Duration::seconds(5));
            assert_eq!(snapshot[9].timestamp, start() + Duration::seconds(50));
            assert!(snapshot.iter().all(|s| s.timestamp != start()));

            let view = dash.chart(&channel.id).unwrap();
            assert_eq!(view.values().len(), 10);
            assert_eq!(view.redraws(), 11);
        }
    }

    #[test]
    fn test_display_and_chart_agree() {
        let mut dash = dashboard();
        let mut source = RandomSource::new(Some(11));
        dash.tick(start(), &mut source).unwrap();

        for channel in dash.channels() {
            let shown = dash.display(&channel.id).unwrap();
            let plotted = dash.chart(&channel.id).unwrap().values()[0];
            assert_eq!(channel.format_value(plotted), shown);
        }
    }

    #[test]
    fn test_humidity_axis_is_fixed() {
        let mut dash = dashboard();
        let mut source = MockSampleSource::new();
        source.expect_next_in_range().returning(|_, _| 150.0);
        dash.tick(start(), &mut source).unwrap();

        let view = dash.chart("humidity").unwrap();
        assert_eq!(view.values(), &[150.0]);
        assert_eq!(view.y_bounds(), [0.0, 100.0]);
    }

    #[test]
    fn test_clear_history() {
        let mut dash = dashboard();
        let mut source = RandomSource::new(Some(5));
        dash.tick(start(), &mut source).unwrap();
        dash.clear_history().unwrap();

        for channel in dash.channels() {
            assert!(dash.buffer(&channel.id).unwrap().is_empty());
            assert!(dash.chart(&channel.id).unwrap().values().is_empty());
            assert_ne!(dash.display(&channel.id).unwrap(), PLACEHOLDER);
        }
    }

    #[test]
    fn test_unknown_surface_is_an_error() {
        let dash = dashboard();
        assert!(matches!(
            dash.display("pressure"),
            Err(AppError::Dashboard(DashboardError::SurfaceNotFound(_)))
        ));
        assert!(matches!(
            dash.chart("pressure"),
            Err(AppError::Dashboard(DashboardError::ChartNotInitialized(_)))
        ));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_channels() {
        assert!(matches!(
            Dashboard::new(Vec::new(), 10),
            Err(AppError::Dashboard(DashboardError::NoChannels))
        ));

        let mut channels: Vec<Channel> = AppConfig::default()
            .channels
            .iter()
            .map(Channel::from_config)
            .collect();
        channels[3].id = "humidity".to_string();
        assert!(matches!(
            Dashboard::new(channels, 10),
            Err(AppError::Dashboard(DashboardError::DuplicateChannel(_)))
        ));
    }

    #[test]
    fn test_rejects_bad_chart_color() {
        let mut channels: Vec<Channel> = AppConfig::default()
            .channels
            .iter()
            .map(Channel::from_config)
            .collect();
        channels[0].color = "red".to_string();
        assert!(matches!(Dashboard::new(channels, 10), Err(AppError::Config(_))));
    }
}
