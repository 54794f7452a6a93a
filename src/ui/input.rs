//! Input handling for the TUI.
//!
//! This module handles keyboard input and translates it into application actions.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Actions that can be performed based on user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit the application
    Quit,
    /// Pause or resume ticks
    ToggleMeasurement,
    /// Select next channel
    NextChannel,
    /// Select previous channel
    PrevChannel,
    /// Clear chart data
    ClearCharts,
    /// Switch between the selected chart and all charts
    ToggleAllCharts,
    /// Show or hide the map
    ToggleMap,
    /// Toggle help panel
    ToggleHelp,
    /// No action
    None,
}

/// Handle keyboard input and return the corresponding action
pub fn handle_input(timeout: Duration) -> std::io::Result<InputAction> {
    if event::poll(timeout)? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                return Ok(map_key_to_action(key_event));
            }
        }
    }
    Ok(InputAction::None)
}

/// Map a key event to an application action
fn map_key_to_action(key_event: KeyEvent) -> InputAction {
    match key_event.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }

        // Toggle measurement
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
            InputAction::ToggleMeasurement
        }

        // Navigate channels
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => InputAction::PrevChannel,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => InputAction::NextChannel,

        // Panels
        KeyCode::Char('c') | KeyCode::Char('C') => InputAction::ClearCharts,
        KeyCode::Char('a') | KeyCode::Char('A') => InputAction::ToggleAllCharts,
        KeyCode::Char('m') | KeyCode::Char('M') => InputAction::ToggleMap,

        // Help
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => {
            InputAction::ToggleHelp
        }

        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_quit_actions() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(map_key_to_action(key(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
    }

    #[test]
    fn test_navigation() {
        assert_eq!(map_key_to_action(key(KeyCode::Up)), InputAction::PrevChannel);
        assert_eq!(map_key_to_action(key(KeyCode::Char('j'))), InputAction::NextChannel);
    }

    #[test]
    fn test_panel_toggles() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('c'))), InputAction::ClearCharts);
        assert_eq!(map_key_to_action(key(KeyCode::Char('a'))), InputAction::ToggleAllCharts);
        assert_eq!(map_key_to_action(key(KeyCode::Char('m'))), InputAction::ToggleMap);
        assert_eq!(map_key_to_action(key(KeyCode::Char('x'))), InputAction::None);
    }
}
