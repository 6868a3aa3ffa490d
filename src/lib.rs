//! `epsdash` library crate.
//!
//! The binary (`epsdash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the chart data can be reused by other front-ends (report, export, TUI)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
