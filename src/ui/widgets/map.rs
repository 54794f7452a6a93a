//! Sensor map widget.

use crate::chart::parse_hex_color;
use crate::map::MapDiagram;
use crate::ui::widgets::chart::to_color;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Circle},
    },
    Frame,
};

fn color_or(value: &str, fallback: Color) -> Color {
    parse_hex_color(value).map(to_color).unwrap_or(fallback)
}

/// Draw the diagram on a canvas. Diagram y grows downwards, canvas y upwards.
pub fn render_map(frame: &mut Frame, area: Rect, map: &MapDiagram) {
    let block = Block::default()
        .title(" Sensor Map ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(color_or(&map.background, Color::Gray))
        .x_bounds([0.0, map.width])
        .y_bounds([0.0, map.height])
        .paint(|ctx| {
            for marker in &map.markers {
                ctx.draw(&Circle {
                    x: marker.x,
                    y: map.height - marker.y,
                    radius: marker.radius,
                    color: color_or(&marker.fill, Color::Green),
                });
            }
            ctx.layer();
            for marker in &map.markers {
                let (x, y) = marker.label_position();
                ctx.print(
                    x,
                    map.height - y,
                    Span::styled(marker.label.clone(), Style::default().fg(Color::Black)),
                );
            }
        });

    frame.render_widget(canvas, area);
}
