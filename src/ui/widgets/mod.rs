//! UI widgets for the dashboard.

pub mod chart;
pub mod help;
pub mod map;
pub mod sensor_list;
pub mod status_bar;

pub use chart::render_chart;
pub use help::render_help;
pub use map::render_map;
pub use sensor_list::render_sensor_list;
pub use status_bar::render_status_bar;
