//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded dataset (`ForecastRecord`, `ForecastTable`) and its column names
//! - render-ready chart data (`Dashboard` and its charts)

pub mod charts;
pub mod types;

pub use charts::*;
pub use types::*;
