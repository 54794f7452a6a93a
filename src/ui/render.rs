//! Frame layout.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::dashboard::Dashboard;
use crate::map::MapDiagram;
use crate::sensors::Channel;
use crate::ui::app::App;
use crate::ui::widgets::{render_chart, render_help, render_map, render_sensor_list, render_status_bar};

/// Draw the whole dashboard
pub fn draw(frame: &mut Frame, app: &App, dashboard: &Dashboard, map: &MapDiagram) {
    let [main, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(frame.area());
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(main);

    if app.show_map {
        let list_height = dashboard.channels().len() as u16 + 2;
        let [list, map_area] =
            Layout::vertical([Constraint::Length(list_height), Constraint::Min(0)]).areas(left);
        render_sensor_list(frame, list, dashboard, app.selected_channel);
        render_map(frame, map_area, map);
    } else {
        render_sensor_list(frame, left, dashboard, app.selected_channel);
    }

    if app.show_all_charts {
        draw_chart_grid(frame, right, app, dashboard);
    } else if let Some(channel) = app
        .selected_channel_id()
        .and_then(|id| dashboard.channels().iter().find(|c| c.id == id))
    {
        draw_channel_chart(frame, right, dashboard, channel, true);
    }

    render_status_bar(
        frame,
        status,
        app.is_measuring,
        app.last_tick.as_ref(),
        app.status_message.as_deref(),
        app.error_message.as_deref(),
    );

    if app.show_help {
        let popup = centered_rect(60, 70, frame.area());
        render_help(frame, popup);
    }
}

/// Two charts per row
fn draw_chart_grid(frame: &mut Frame, area: Rect, app: &App, dashboard: &Dashboard) {
    let channels = dashboard.channels();
    let rows = channels.len().div_ceil(2) as u32;
    let row_areas = Layout::vertical((0..rows).map(|_| Constraint::Ratio(1, rows))).split(area);

    for (row, pair) in channels.chunks(2).enumerate() {
        let cells = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(row_areas[row]);
        for (col, channel) in pair.iter().enumerate() {
            let selected = row * 2 + col == app.selected_channel;
            draw_channel_chart(frame, cells[col], dashboard, channel, selected);
        }
    }
}

fn draw_channel_chart(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard,
    channel: &Channel,
    selected: bool,
) {
    match (dashboard.chart(&channel.id), dashboard.buffer(&channel.id)) {
        (Ok(view), Ok(buffer)) => render_chart(frame, area, channel, view, buffer, selected),
        (Err(e), _) | (_, Err(e)) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red));
            frame.render_widget(Paragraph::new(e.to_string()).block(block), area);
        }
    }
}

/// Rectangle of the given percentage size, centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
