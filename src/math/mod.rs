//! Numeric building blocks: descriptive stats, histogram/KDE, box plots and
//! correlation.

pub mod boxplot;
pub mod correlation;
pub mod histogram;
pub mod stats;

pub use boxplot::*;
pub use correlation::*;
pub use histogram::*;
pub use stats::*;
