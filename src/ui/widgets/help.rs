//! Help panel widget.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[("↑/k", "Select previous sensor"), ("↓/j", "Select next sensor")],
    ),
    (
        "Controls",
        &[
            ("Space/p", "Pause or resume readings"),
            ("c", "Clear chart history"),
            ("a", "Show all charts / selected chart"),
            ("m", "Show or hide the sensor map"),
        ],
    ),
    ("Other", &[("?/h/F1", "Toggle this help"), ("q/Esc", "Quit")]),
];

/// Render the help panel
pub fn render_help(frame: &mut Frame, area: Rect) {
    // Clear the area first
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Cyan);

    let mut help_text = vec![Line::from("")];
    for (section, entries) in SHORTCUTS {
        help_text.push(Line::from(Span::styled(*section, heading)));
        for (keys, description) in entries.iter() {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<9}", keys), key),
                Span::raw(format!("- {}", description)),
            ]));
        }
        help_text.push(Line::from(""));
    }
    help_text.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("?", key.add_modifier(Modifier::BOLD)),
        Span::raw(" to close this help"),
    ]));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
