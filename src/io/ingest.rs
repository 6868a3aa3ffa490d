//! CSV ingest for the cleaned analyst-forecast dataset.
//!
//! This module turns the cleaned IBES export into an immutable `ForecastTable`.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail fast**: a bad date or number stops the load; nothing is rendered
//!   from a partially read file
//! - **Pass-through** of unknown columns so they can take part in the
//!   correlation matrix when numeric

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use log::{debug, info};

use crate::domain::{
    COL_ACTUAL, COL_ANALYS, COL_ESTIMATOR, COL_FPI, COL_VALUE, ColumnInfo, ColumnKind, DATE_COLUMNS,
    ForecastDates, ForecastRecord, ForecastTable, REQUIRED_COLUMNS, is_missing_cell,
};
use crate::error::AppError;

/// Load the dataset at `path`.
///
/// A missing file is reported as the dedicated "missing input" error.
pub fn load_forecast_table(path: &Path) -> Result<ForecastTable, AppError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::missing_input_file(path)
        } else {
            AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
        }
    })?;

    let table = read_forecast_table(file)?;
    info!("Loaded {} forecast rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse a dataset from any reader (used by `load_forecast_table` and tests).
pub fn read_forecast_table<R: Read>(input: R) -> Result<ForecastTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    let header_map = build_header_map(&names);
    let required = resolve_required_columns(&header_map)?;

    let extra_idx: Vec<usize> = (0..names.len())
        .filter(|idx| !required.values().any(|r| r == idx))
        .collect();
    let extra_columns: Vec<String> = extra_idx.iter().map(|&idx| names[idx].clone()).collect();

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {line}: {e}")))?;
        let parsed = parse_row(&record, &required, &extra_idx).map_err(|msg| AppError::new(2, format!("Line {line}: {msg}")))?;
        records.push(parsed);
    }

    let columns = classify_columns(&names, &required, &extra_idx, &records);
    for column in &columns {
        debug!("column {} -> {:?}", column.name, column.kind);
    }

    Ok(ForecastTable::new(columns, extra_columns, records))
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn build_header_map(names: &[String]) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in names.iter().enumerate() {
        map.entry(name.clone()).or_insert(idx);
    }
    map
}

/// Map each required column to its index (exact match first, then
/// case-insensitive).
fn resolve_required_columns(header_map: &HashMap<String, usize>) -> Result<HashMap<&'static str, usize>, AppError> {
    let mut out = HashMap::new();
    for &name in REQUIRED_COLUMNS.iter() {
        let idx = header_map.get(name).copied().or_else(|| {
            let mut matches: Vec<usize> = header_map
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, &v)| v)
                .collect();
            matches.sort_unstable();
            matches.first().copied()
        });
        let idx = idx.ok_or_else(|| AppError::new(2, format!("Missing required column: `{name}`")))?;
        out.insert(name, idx);
    }
    Ok(out)
}

fn parse_row(
    record: &StringRecord,
    required: &HashMap<&'static str, usize>,
    extra_idx: &[usize],
) -> Result<ForecastRecord, String> {
    let cell = |name: &str| get_cell(record, required, name);

    let mut dates = [NaiveDateTime::MIN; 5];
    for (slot, name) in dates.iter_mut().zip(DATE_COLUMNS) {
        *slot = parse_date(cell(name)).map_err(|e| format!("`{name}`: {e}"))?;
    }

    Ok(ForecastRecord {
        estimator: cell(COL_ESTIMATOR).to_string(),
        analyst: cell(COL_ANALYS).to_string(),
        fpi: normalize_fpi(cell(COL_FPI)),
        value: parse_number(cell(COL_VALUE)).map_err(|e| format!("`{COL_VALUE}`: {e}"))?,
        actual: parse_number(cell(COL_ACTUAL)).map_err(|e| format!("`{COL_ACTUAL}`: {e}"))?,
        dates: ForecastDates {
            activated: dates[0],
            announced: dates[1],
            revised: dates[2],
            period_end: dates[3],
            actual_announced: dates[4],
        },
        extras: extra_idx
            .iter()
            .map(|&idx| record.get(idx).map(str::trim).unwrap_or("").to_string())
            .collect(),
    })
}

fn get_cell<'a>(record: &'a StringRecord, required: &HashMap<&'static str, usize>, name: &str) -> &'a str {
    required
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .unwrap_or("")
}

/// Forecast period codes are compared as text. Integral codes written as
/// floats by upstream tooling (`6.0`) are folded to their integer spelling.
fn normalize_fpi(s: &str) -> String {
    if let Some(int_part) = s.strip_suffix(".0") {
        if !int_part.is_empty() && int_part.chars().all(|c| c.is_ascii_digit()) {
            return int_part.to_string();
        }
    }
    s.to_string()
}

fn classify_columns(
    names: &[String],
    required: &HashMap<&'static str, usize>,
    extra_idx: &[usize],
    records: &[ForecastRecord],
) -> Vec<ColumnInfo> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let role = required.iter().find(|&(_, &i)| i == idx).map(|(&n, _)| n);
            let kind = match role {
                Some(n) if DATE_COLUMNS.contains(&n) => ColumnKind::Date,
                Some(COL_VALUE) | Some(COL_ACTUAL) => ColumnKind::Numeric,
                Some(COL_ESTIMATOR) => infer_kind(records.iter().map(|r| r.estimator.as_str())),
                Some(COL_ANALYS) => infer_kind(records.iter().map(|r| r.analyst.as_str())),
                Some(COL_FPI) => infer_kind(records.iter().map(|r| r.fpi.as_str())),
                _ => {
                    let pos = extra_idx.iter().position(|&i| i == idx).unwrap_or(usize::MAX);
                    infer_kind(records.iter().map(|r| r.extras.get(pos).map(String::as_str).unwrap_or("")))
                }
            };
            let name = role.map(str::to_string).unwrap_or_else(|| name.clone());
            ColumnInfo { name, kind }
        })
        .collect()
}

/// A column is numeric when it has at least one value and every non-missing
/// value parses as a finite number.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut seen = false;
    for cell in cells {
        if is_missing_cell(cell) {
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => seen = true,
            _ => return ColumnKind::Text,
        }
    }
    if seen { ColumnKind::Numeric } else { ColumnKind::Text }
}

/// Parse a numeric cell. Missing markers become `NaN`.
fn parse_number(s: &str) -> Result<f64, String> {
    if is_missing_cell(s) {
        return Ok(f64::NAN);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid number '{s}'.")),
    }
}

fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    // The cleaning step writes ISO timestamps, but raw IBES exports use
    // `YYYYMMDD`. We accept a small set of common formats while keeping
    // parsing deterministic.
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];
    const DATE_FMTS: [&str; 5] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.and_time(chrono::NaiveTime::MIN));
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY-MM-DD HH:MM:SS, YYYYMMDD, MM/DD/YYYY, YYYY/MM/DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ESTIMATOR,ANALYS,FPI,VALUE,ACTUAL,ACTDATS,ANNDATS,REVDATS,FPEDATS,ANNDATS_ACT";

    fn csv(rows: &[&str]) -> String {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn parses_required_columns_and_dates() {
        let data = csv(&["183,71182,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30"]);
        let table = read_forecast_table(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);

        let r = &table.records()[0];
        assert_eq!(r.estimator, "183");
        assert_eq!(r.analyst, "71182");
        assert_eq!(r.fpi, "6");
        assert!((r.value - 1.5).abs() < 1e-12);
        assert_eq!(
            r.dates.period_end,
            NaiveDate::from_ymd_opt(2019, 9, 30).unwrap().and_time(chrono::NaiveTime::MIN)
        );
    }

    #[test]
    fn invalid_date_fails_with_line_and_column() {
        let data = csv(&["1,2,6,1.5,1.6,2019-01-02,not-a-date,2019-01-04,2019-09-30,2019-10-30"]);
        let err = read_forecast_table(data.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Line 2"));
        assert!(err.to_string().contains("ANNDATS"));
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "ESTIMATOR,ANALYS,FPI,VALUE\n1,2,6,1.0";
        let err = read_forecast_table(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Missing required column: `ACTUAL`"));
        assert!(!err.is_missing_input());
    }

    #[test]
    fn empty_numeric_cell_is_missing_value() {
        let data = csv(&["1,2,6,,1.6,20190102,20190103,20190104,20190930,20191030"]);
        let table = read_forecast_table(data.as_bytes()).unwrap();
        assert!(table.records()[0].value.is_nan());
    }

    #[test]
    fn non_numeric_value_fails() {
        let data = csv(&["1,2,6,abc,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30"]);
        let err = read_forecast_table(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("`VALUE`"));
    }

    #[test]
    fn extra_columns_are_classified() {
        let data = format!(
            "{HEADER},TICKER,PDF\n1,2,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30,AAPL,0.25\n\
             3,4,1,0.5,0.4,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30,AAPL,"
        );
        let table = read_forecast_table(data.as_bytes()).unwrap();
        assert_eq!(table.column_kind("TICKER"), Some(ColumnKind::Text));
        assert_eq!(table.column_kind("PDF"), Some(ColumnKind::Numeric));
        assert_eq!(table.column_kind("ANNDATS"), Some(ColumnKind::Date));
        assert_eq!(table.column_kind("ESTIMATOR"), Some(ColumnKind::Numeric));
        assert_eq!(table.correlation_columns(), vec!["VALUE", "ACTUAL", "PDF"]);
    }

    #[test]
    fn missing_markers_keep_column_numeric() {
        let data = format!(
            "{HEADER},PDF,NOTE\n1,2,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30,0.25,NA\n\
             3,4,6,2.0,NaN,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30,NaN,n/a\n\
             5,6,6,2.5,2.4,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30,0.75,"
        );
        let table = read_forecast_table(data.as_bytes()).unwrap();
        assert_eq!(table.column_kind("PDF"), Some(ColumnKind::Numeric));
        // Only missing markers: nothing to correlate.
        assert_eq!(table.column_kind("NOTE"), Some(ColumnKind::Text));
        assert_eq!(table.correlation_columns(), vec!["VALUE", "ACTUAL", "PDF"]);

        let pdf: Vec<f64> = table.records().iter().map(|r| table.numeric_cell(r, "PDF")).collect();
        assert_eq!(pdf[0], 0.25);
        assert!(pdf[1].is_nan());
        assert_eq!(pdf[2], 0.75);
        assert!(table.records()[1].actual.is_nan());
    }

    #[test]
    fn bom_and_case_are_tolerated() {
        let data = "\u{feff}estimator,analys,fpi,value,actual,actdats,anndats,revdats,fpedats,anndats_act\n\
                    1,2,6.0,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30";
        let table = read_forecast_table(data.as_bytes()).unwrap();
        assert_eq!(table.records()[0].fpi, "6");
        assert_eq!(table.columns()[0].name, "ESTIMATOR");
    }

    #[test]
    fn missing_file_is_missing_input() {
        let err = load_forecast_table(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(err.is_missing_input());
    }
}
