//! Application state management for the TUI.
//!
//! This module manages the UI state: which channel is selected, which
//! panels are visible, and the status line. Readings themselves live in
//! the [`Dashboard`](crate::dashboard::Dashboard).

use crate::dashboard::TickReport;
use crate::ui::input::InputAction;

/// Application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Whether ticks are applied
    pub is_measuring: bool,
    /// Index of currently selected channel
    pub selected_channel: usize,
    /// Channel ids, in display order
    pub channel_ids: Vec<String>,
    /// Show every chart instead of only the selected one
    pub show_all_charts: bool,
    /// Show the sensor map panel
    pub show_map: bool,
    /// Show help panel
    pub show_help: bool,
    /// Number and time label of the last applied tick
    pub last_tick: Option<(u64, String)>,
    /// Status message
    pub status_message: Option<String>,
    /// Error message
    pub error_message: Option<String>,
}

impl App {
    /// Create a new application state
    pub fn new(channel_ids: Vec<String>) -> Self {
        Self {
            should_quit: false,
            is_measuring: true,
            selected_channel: 0,
            channel_ids,
            show_all_charts: false,
            show_map: true,
            show_help: false,
            last_tick: None,
            status_message: Some("Dashboard started".to_string()),
            error_message: None,
        }
    }

    /// Apply a UI-only action.
    ///
    /// Returns `true` when the action also needs the dashboard itself
    /// (clearing charts), which the caller performs.
    pub fn apply(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::Quit => self.should_quit = true,
            InputAction::ToggleMeasurement => self.toggle_measuring(),
            InputAction::NextChannel => self.next_channel(),
            InputAction::PrevChannel => self.prev_channel(),
            InputAction::ToggleAllCharts => {
                self.show_all_charts = !self.show_all_charts;
            }
            InputAction::ToggleMap => self.show_map = !self.show_map,
            InputAction::ToggleHelp => self.show_help = !self.show_help,
            InputAction::ClearCharts => return true,
            InputAction::None => {}
        }
        false
    }

    /// Record a completed tick
    pub fn record_tick(&mut self, report: &TickReport) {
        self.last_tick = Some((report.tick, crate::sensors::time_label(&report.timestamp)));
        self.error_message = None;
    }

    /// Toggle measurement state
    pub fn toggle_measuring(&mut self) {
        self.is_measuring = !self.is_measuring;
        self.status_message = Some(format!(
            "Measurement {}",
            if self.is_measuring { "resumed" } else { "paused" }
        ));
    }

    /// Select next channel
    pub fn next_channel(&mut self) {
        if !self.channel_ids.is_empty() {
            self.selected_channel = (self.selected_channel + 1) % self.channel_ids.len();
        }
    }

    /// Select previous channel
    pub fn prev_channel(&mut self) {
        let count = self.channel_ids.len();
        if count > 0 {
            self.selected_channel = (self.selected_channel + count - 1) % count;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Get currently selected channel id
    pub fn selected_channel_id(&self) -> Option<&str> {
        self.channel_ids.get(self.selected_channel).map(String::as_str)
    }
}
