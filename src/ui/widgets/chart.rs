//! Chart widget for a channel's sliding window.

use crate::chart::{ChartView, Rgb};
use crate::sensors::Channel;
use crate::series::SeriesBuffer;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Render one channel's line chart.
///
/// The vertical axis always spans the channel's configured bounds and the
/// horizontal axis always spans the full window, so a partly filled
/// window draws from the left.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    channel: &Channel,
    view: &ChartView,
    buffer: &SeriesBuffer,
    selected: bool,
) {
    let title = match (buffer.latest(), buffer.stats()) {
        (Some(latest), Some(s)) => format!(
            " {}  {}  min {} · avg {} · max {}  [{}/{}] ",
            view.spec().label,
            channel.format_value(latest.value),
            channel.format.render(s.min),
            channel.format.render(s.avg),
            channel.format.render(s.max),
            buffer.len(),
            buffer.capacity()
        ),
        _ => format!(" {} ", view.spec().label),
    };
    let border = if selected { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let points = view.points();
    let color = to_color(view.spec().color);
    let datasets = if buffer.is_empty() {
        Vec::new()
    } else {
        vec![
            Dataset::default()
                .name(channel.id.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&points),
        ]
    };

    let [y_min, y_max] = view.y_bounds();
    let x_max = buffer.capacity().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = match (view.labels().first(), view.labels().last()) {
        (Some(first), Some(last)) if view.labels().len() > 1 => {
            vec![Span::raw(first.clone()), Span::raw(last.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.clone())],
        _ => vec![Span::raw("")],
    };

    let y_labels = vec![
        Span::raw(channel.format.render(y_min)),
        Span::raw(channel.format.render((y_min + y_max) / 2.0)),
        Span::styled(
            channel.format.render(y_max),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(channel.suffix.trim())
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
