//! Logger setup.
//!
//! The text commands log to stderr. The TUI owns the terminal, so it either
//! logs to a file or not at all.

use std::fs::File;
use std::path::Path;

use env_logger::Target;
use log::{LevelFilter, debug};

use crate::error::AppError;

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    Off,
}

/// Level for the given verbosity flags. `quiet` wins over `verbose`.
pub fn level_filter(verbose: bool, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Off
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Level the flags impose on the logger. Without `-v`/`-q`, a set `RUST_LOG`
/// keeps its own directives (`None`).
pub fn forced_level(verbose: bool, quiet: bool, rust_log_set: bool) -> Option<LevelFilter> {
    if verbose || quiet || !rust_log_set {
        Some(level_filter(verbose, quiet))
    } else {
        None
    }
}

/// Initialize the global logger from `RUST_LOG`, overridden by `-v`/`-q`.
pub fn init_logger(verbose: bool, quiet: bool, sink: LogSink<'_>) -> Result<(), AppError> {
    let level = match sink {
        LogSink::Off => Some(LevelFilter::Off),
        _ => forced_level(verbose, quiet, std::env::var_os("RUST_LOG").is_some()),
    };

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let LogSink::File(path) = sink {
        let file = File::create(path)
            .map_err(|e| AppError::new(2, format!("Failed to open log file '{}': {e}", path.display())))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A second init (tests, embedding) keeps the first logger.
    if builder.try_init().is_ok() {
        debug!("Logger initialized with level: {:?}", log::max_level());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(level_filter(true, true), LevelFilter::Off);
        assert_eq!(level_filter(true, false), LevelFilter::Debug);
        assert_eq!(level_filter(false, false), LevelFilter::Warn);
    }

    #[test]
    fn rust_log_applies_without_flags() {
        assert_eq!(forced_level(false, false, true), None);
        assert_eq!(forced_level(false, false, false), Some(LevelFilter::Warn));
        assert_eq!(forced_level(true, false, true), Some(LevelFilter::Debug));
        assert_eq!(forced_level(false, true, true), Some(LevelFilter::Off));
    }

    #[test]
    fn repeated_init_is_harmless() {
        assert!(init_logger(false, true, LogSink::Stderr).is_ok());
        assert!(init_logger(true, false, LogSink::Off).is_ok());
    }

    #[test]
    fn unwritable_log_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("tui.log");
        let err = init_logger(false, false, LogSink::File(&missing)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
