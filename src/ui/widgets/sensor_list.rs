//! Channel list widget: the display surfaces.

use crate::dashboard::Dashboard;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render every channel's current display text
pub fn render_sensor_list(frame: &mut Frame, area: Rect, dashboard: &Dashboard, selected: usize) {
    let block = Block::default()
        .title(" Sensors ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let label_width = dashboard
        .channels()
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);

    let items: Vec<ListItem> = dashboard
        .channels()
        .iter()
        .map(|channel| {
            let text = dashboard.display(&channel.id).unwrap_or("?");
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<width$}  ", channel.label, width = label_width)),
                Span::styled(
                    text.to_string(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        )
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default();
    list_state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}
