//! Terminal UI module using ratatui.
//!
//! This module provides an interactive terminal interface showing every
//! channel's current reading, its chart and the sensor map.

pub mod app;
pub mod input;
pub mod render;
pub mod widgets;

pub use app::App;
pub use input::handle_input;

use std::time::Duration;

use ratatui::DefaultTerminal;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, UiError};
use crate::map::MapDiagram;
use crate::service::{self, DashboardService};

/// How long the loop waits between input polls
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Run the interactive dashboard until the user quits or `cancel` fires
pub async fn run(service: &mut DashboardService, cancel: &CancellationToken) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, service, cancel).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    service: &mut DashboardService,
    cancel: &CancellationToken,
) -> Result<()> {
    let channel_ids = service
        .dashboard()
        .channels()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    let mut app = App::new(channel_ids);
    let map = MapDiagram::sensor_map();
    let mut ticker = service::ticker(service.period());

    tracing::info!(period_ms = service.period().as_millis() as u64, "Interactive dashboard started");

    while !app.should_quit {
        terminal
            .draw(|frame| render::draw(frame, &app, service.dashboard(), &map))
            .map_err(|e| UiError::RenderError(e.to_string()))?;

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if app.is_measuring {
                    match service.tick() {
                        Ok(report) => app.record_tick(&report),
                        Err(e) => {
                            tracing::error!("Tick failed: {}", e);
                            app.set_error(e.to_string());
                        }
                    }
                }
            }
            _ = tokio::time::sleep(INPUT_POLL) => {}
        }

        let action = handle_input(Duration::ZERO).map_err(|e| UiError::InputError(e.to_string()))?;
        if app.apply(action) {
            service.dashboard_mut().clear_history()?;
            app.set_status("Charts cleared".to_string());
        }
    }

    tracing::info!("Interactive dashboard stopped");
    Ok(())
}
