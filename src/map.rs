//! Static sensor map.
//!
//! The map is a small typed diagram: a background rectangle and a few
//! labeled circular markers. It is built once and rendered either to SVG
//! markup or onto the terminal canvas.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;

pub const MAP_WIDTH: f64 = 300.0;
pub const MAP_HEIGHT: f64 = 200.0;

const MARKER_COLOR: &str = "#4CAF50";
const BACKGROUND_COLOR: &str = "#e5e5e5";
const LABEL_COLOR: &str = "#333";
const LABEL_FONT: &str = "Arial";
const LABEL_SIZE: u32 = 12;
/// Labels sit this far below their marker's center
const LABEL_OFFSET: f64 = 20.0;

/// Circular marker with a caption
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: String,
    pub label: String,
}

impl Marker {
    /// Position of the caption, in diagram coordinates (y grows downwards)
    pub fn label_position(&self) -> (f64, f64) {
        (self.x, self.y + LABEL_OFFSET)
    }
}

/// Fixed diagram
#[derive(Debug, Clone, PartialEq)]
pub struct MapDiagram {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub markers: Vec<Marker>,
}

/// Builder for [`MapDiagram`]
#[derive(Debug, Clone)]
pub struct MapBuilder {
    diagram: MapDiagram,
}

impl MapBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            diagram: MapDiagram {
                width,
                height,
                background: BACKGROUND_COLOR.to_string(),
                markers: Vec::new(),
            },
        }
    }

    pub fn marker(mut self, x: f64, y: f64, label: &str) -> Self {
        self.diagram.markers.push(Marker {
            x,
            y,
            radius: 10.0,
            fill: MARKER_COLOR.to_string(),
            label: label.to_string(),
        });
        self
    }

    pub fn build(self) -> MapDiagram {
        self.diagram
    }
}

impl MapDiagram {
    /// Background plus the three sensor markers of the demo floor plan
    pub fn sensor_map() -> Self {
        MapBuilder::new(MAP_WIDTH, MAP_HEIGHT)
            .marker(50.0, 50.0, "Sensor 1")
            .marker(150.0, 100.0, "Sensor 2")
            .marker(250.0, 150.0, "Sensor 3")
            .build()
    }

    /// Render as a standalone SVG document scaled to its container
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 {} {}">"#,
            self.width, self.height
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.background)
        );
        for marker in &self.markers {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                marker.x,
                marker.y,
                marker.radius,
                escape_xml(&marker.fill)
            );
        }
        for marker in &self.markers {
            let (x, y) = marker.label_position();
            let _ = writeln!(
                svg,
                r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
                x,
                y,
                LABEL_FONT,
                LABEL_SIZE,
                LABEL_COLOR,
                escape_xml(&marker.label)
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Write the SVG rendering to `path`
    pub fn export_svg(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        tracing::info!(path = %path.display(), markers = self.markers.len(), "Sensor map exported");
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
