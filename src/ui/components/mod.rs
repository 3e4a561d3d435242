pub mod keyboard_diagram;
pub mod metrics_bar;
pub mod typing_area;
