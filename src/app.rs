//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging for the chosen front-end
//! - loads the dataset and builds the dashboard
//! - hands it to the TUI, the text report or the exporter

use clap::Parser;

use crate::cli::{Command, DataArgs, ExportArgs, ReportArgs, TuiArgs};
use crate::domain::DashboardConfig;
use crate::error::AppError;
use crate::logging::{LogSink, init_logger};

pub mod pipeline;
pub mod selector;
pub mod view;

use pipeline::Session;

/// Entry point for the `epsdash` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; real environment variables win.
    dotenvy::dotenv().ok();

    // `epsdash` and `epsdash -d FILE` behave like `epsdash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => {
            let sink = match &args.log_file {
                Some(path) => LogSink::File(path),
                None => LogSink::Off,
            };
            init_logger(cli.verbose, cli.quiet, sink)?;
            handle_tui(args)
        }
        Command::Report(args) => {
            init_logger(cli.verbose, cli.quiet, LogSink::Stderr)?;
            handle_report(args)
        }
        Command::Export(args) => {
            init_logger(cli.verbose, cli.quiet, LogSink::Stderr)?;
            handle_export(args)
        }
    }
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    // Load before touching the terminal so input errors print normally.
    let session = Session::open(dashboard_config_from_args(&args.data))?;
    crate::tui::run(session)
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let session = Session::open(dashboard_config_from_args(&args.data))?;
    let layout = crate::report::ReportLayout {
        width: args.width,
        height: args.height,
    };
    print!(
        "{}",
        crate::report::format_dashboard(&session.dashboard, &session.config.title, layout)
    );
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let session = Session::open(dashboard_config_from_args(&args.data))?;
    let document = crate::io::export::DashboardExport {
        title: &session.config.title,
        fpi_options: session.selector.options(),
        dashboard: &session.dashboard,
    };

    for path in crate::io::export::export_dashboard(&args.out, &document, args.json_only)? {
        println!("{}", path.display());
    }
    Ok(())
}

pub fn dashboard_config_from_args(args: &DataArgs) -> DashboardConfig {
    DashboardConfig {
        data_path: args.data.clone(),
        title: args.title.clone(),
        fpi: args.fpi.clone(),
    }
}

/// Rewrite argv so `epsdash` defaults to `epsdash tui`.
///
/// Rules:
/// - `epsdash`                      -> `epsdash tui`
/// - `epsdash -d FILE ...`          -> `epsdash tui -d FILE ...`
/// - `epsdash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "export");
    if is_subcommand {
        return argv;
    }

    // Global verbosity flags may precede the subcommand.
    let first_non_global = argv
        .iter()
        .skip(1)
        .position(|a| !matches!(a.as_str(), "-v" | "--verbose" | "-q" | "--quiet"))
        .map(|i| i + 1);

    match first_non_global {
        None => argv.push("tui".to_string()),
        Some(i) if matches!(argv[i].as_str(), "tui" | "report" | "export" | "help") => {}
        Some(i) if argv[i].starts_with('-') => argv.insert(i, "tui".to_string()),
        Some(_) => {}
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["epsdash"])), args(&["epsdash", "tui"]));
        assert_eq!(rewrite_args(args(&["epsdash", "-v"])), args(&["epsdash", "-v", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(args(&["epsdash", "-d", "x.csv"])),
            args(&["epsdash", "tui", "-d", "x.csv"])
        );
        assert_eq!(
            rewrite_args(args(&["epsdash", "-q", "--fpi", "6"])),
            args(&["epsdash", "-q", "tui", "--fpi", "6"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for list in [
            &["epsdash", "report"][..],
            &["epsdash", "export", "--out", "x"][..],
            &["epsdash", "--help"][..],
            &["epsdash", "-v", "report"][..],
        ] {
            assert_eq!(rewrite_args(args(list)), args(list));
        }
    }
}
