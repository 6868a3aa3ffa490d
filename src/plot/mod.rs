//! Chart rendering.
//!
//! - fixed-grid ASCII charts for the text report (`ascii`)
//! - Plotters drawing shared by the TUI and SVG export (`draw`)
//! - SVG documents (`svg`)

pub mod ascii;
pub mod draw;
pub mod svg;

pub use ascii::*;
pub use draw::{Marker, Theme};
pub use svg::write_svg_charts;
