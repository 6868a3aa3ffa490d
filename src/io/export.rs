//! Export the computed dashboard to disk.
//!
//! `dashboard.json` holds every chart's data (NaN correlations become `null`),
//! so two runs over the same input can be diffed. The SVG charts are optional.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::domain::Dashboard;
use crate::error::AppError;

pub const DASHBOARD_JSON: &str = "dashboard.json";

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct DashboardExport<'a> {
    pub title: &'a str,
    pub fpi_options: &'a [String],
    pub dashboard: &'a Dashboard,
}

/// Write `document` as pretty JSON to `path`.
pub fn write_dashboard_json(path: &Path, document: &DashboardExport<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(|e| AppError::new(4, format!("Failed to write '{}': {e}", path.display())))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| AppError::new(4, format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}

/// Create `dir` if needed and write the JSON document plus, unless
/// `json_only`, the SVG charts. Returns every path written.
pub fn export_dashboard(dir: &Path, document: &DashboardExport<'_>, json_only: bool) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::new(4, format!("Failed to create output directory '{}': {e}", dir.display())))?;

    let json_path = dir.join(DASHBOARD_JSON);
    write_dashboard_json(&json_path, document)?;
    let mut written = vec![json_path];

    if !json_only {
        written.extend(crate::plot::write_svg_charts(dir, document.dashboard)?);
    }

    info!("exported {} file(s) to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_dashboard;
    use crate::io::ingest::read_forecast_table;

    const DATA: &str = "ESTIMATOR,ANALYS,FPI,VALUE,ACTUAL,ACTDATS,ANNDATS,REVDATS,FPEDATS,ANNDATS_ACT\n\
        1,10,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        2,20,6,2.0,1.9,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n";

    #[test]
    fn json_only_export_writes_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        let dash = build_dashboard(&table, "6");
        let options = vec!["6".to_string()];
        let doc = DashboardExport {
            title: "AAPL",
            fpi_options: &options,
            dashboard: &dash,
        };

        let written = export_dashboard(&out, &doc, true).unwrap();
        assert_eq!(written, vec![out.join(DASHBOARD_JSON)]);

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(json["title"], "AAPL");
        assert_eq!(json["dashboard"]["fpi"], "6");
        assert_eq!(json["dashboard"]["row_count"], 2);
    }

    #[test]
    fn undefined_correlations_export_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        let dash = build_dashboard(&table, "missing");
        let doc = DashboardExport {
            title: "AAPL",
            fpi_options: &[],
            dashboard: &dash,
        };

        let path = dir.path().join(DASHBOARD_JSON);
        write_dashboard_json(&path, &doc).unwrap();
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["dashboard"]["correlation"]["values"][0][0].is_null());
    }
}
