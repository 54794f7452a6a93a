//! Per-channel chart collaborators.
//!
//! Every channel gets one [`ChartView`] built at startup from a
//! [`ChartSpec`]. The dashboard calls [`ChartBoard::update`] after each
//! append and the terminal UI draws whatever the view currently holds.

use std::collections::HashMap;

use crate::error::{ConfigError, DashboardError};
use crate::sensors::{Channel, Sample};

/// Kind of chart drawn for a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Parse `#RRGGBB` (the leading `#` is optional)
pub fn parse_hex_color(value: &str) -> Option<Rgb> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Static chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub label: String,
    pub color: Rgb,
    /// Vertical axis bounds, independent of the plotted values
    pub y_bounds: [f64; 2],
    /// Redraws are immediate
    pub animation_ms: u64,
    /// Line curvature hint; terminal rendering draws straight segments
    pub tension: f64,
}

impl ChartSpec {
    pub fn for_channel(channel: &Channel) -> Result<Self, ConfigError> {
        let color = parse_hex_color(&channel.color).ok_or_else(|| {
            ConfigError::invalid(format!("channels.{}.color", channel.id), "expected #RRGGBB")
        })?;

        Ok(Self {
            kind: ChartKind::Line,
            label: channel.label.clone(),
            color,
            y_bounds: [channel.axis_min, channel.axis_max],
            animation_ms: 0,
            tension: 0.1,
        })
    }
}

/// What a chart currently shows
#[derive(Debug, Clone)]
pub struct ChartView {
    spec: ChartSpec,
    labels: Vec<String>,
    values: Vec<f64>,
    redraws: u64,
}

impl ChartView {
    pub fn new(spec: ChartSpec) -> Self {
        Self {
            spec,
            labels: Vec::new(),
            values: Vec::new(),
            redraws: 0,
        }
    }

    /// Replace the plotted series with `snapshot`
    pub fn repaint(&mut self, snapshot: &[Sample]) {
        self.labels = snapshot.iter().map(Sample::label).collect();
        self.values = snapshot.iter().map(|s| s.value).collect();
        self.redraws += 1;
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Time labels, oldest first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[cfg(test)]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(index, value)` pairs ready for plotting
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        self.spec.y_bounds
    }

    #[cfg(test)]
    pub fn redraws(&self) -> u64 {
        self.redraws
    }
}

/// All chart views, keyed by channel id
#[derive(Debug, Clone, Default)]
pub struct ChartBoard {
    views: HashMap<String, ChartView>,
}

impl ChartBoard {
    /// Construct one empty chart per channel
    pub fn new(channels: &[Channel]) -> Result<Self, ConfigError> {
        let mut views = HashMap::with_capacity(channels.len());
        for channel in channels {
            views.insert(channel.id.clone(), ChartView::new(ChartSpec::for_channel(channel)?));
        }
        Ok(Self { views })
    }

    /// Repaint the chart of `channel_id` from `snapshot`
    pub fn update(&mut self, channel_id: &str, snapshot: &[Sample]) -> Result<(), DashboardError> {
        let view = self
            .views
            .get_mut(channel_id)
            .ok_or_else(|| DashboardError::ChartNotInitialized(channel_id.to_string()))?;
        view.repaint(snapshot);
        tracing::trace!(channel = channel_id, points = view.values.len(), redraws = view.redraws, "Chart repainted");
        Ok(())
    }

    pub fn view(&self, channel_id: &str) -> Result<&ChartView, DashboardError> {
        self.views
            .get(channel_id)
            .ok_or_else(|| DashboardError::ChartNotInitialized(channel_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_channels;
    use chrono::{Local, TimeZone};

    fn channels() -> Vec<Channel> {
        default_channels().iter().map(Channel::from_config).collect()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#4CAF50"), Some(Rgb(0x4c, 0xaf, 0x50)));
        assert_eq!(parse_hex_color("e5e5e5"), Some(Rgb(0xe5, 0xe5, 0xe5)));
        assert_eq!(parse_hex_color("#4CAF5"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_spec_from_channel() {
        let humidity = &channels()[1];
        let spec = ChartSpec::for_channel(humidity).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.label, "Humidity (%)");
        assert_eq!(spec.y_bounds, [0.0, 100.0]);
        assert_eq!(spec.animation_ms, 0);
        assert_eq!(spec.color, Rgb(0x4c, 0xaf, 0x50));
    }

    #[test]
    fn test_bounds_ignore_out_of_range_values() {
        let mut board = ChartBoard::new(&channels()).unwrap();
        let ts = Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        board
            .update("humidity", &[Sample::new(ts, 180.0), Sample::new(ts, -20.0)])
            .unwrap();

        let view = board.view("humidity").unwrap();
        assert_eq!(view.y_bounds(), [0.0, 100.0]);
        assert_eq!(view.values(), &[180.0, -20.0]);
    }

    #[test]
    fn test_update_repaints_from_snapshot() {
        let mut board = ChartBoard::new(&channels()).unwrap();
        let ts = Local.with_ymd_and_hms(2024, 1, 15, 8, 7, 6).unwrap();
        board.update("temperature", &[Sample::new(ts, 21.5)]).unwrap();

        let view = board.view("temperature").unwrap();
        assert_eq!(view.labels(), &["8:7:6".to_string()]);
        assert_eq!(view.points(), vec![(0.0, 21.5)]);
        assert_eq!(view.redraws(), 1);
    }

    #[test]
    fn test_unknown_chart_is_an_error() {
        let mut board = ChartBoard::new(&channels()).unwrap();
        assert!(matches!(
            board.update("pressure", &[]),
            Err(DashboardError::ChartNotInitialized(id)) if id == "pressure"
        ));
        assert!(board.view("pressure").is_err());
    }
}
