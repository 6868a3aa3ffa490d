//! Text output: the fixed narrative and the plain-text dashboard.

pub mod format;
pub mod narrative;

pub use format::*;
