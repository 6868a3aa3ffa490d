//! Dataset types.
//!
//! The loaded table is created once and only ever read afterwards. Every later
//! stage (selector, filtered view, chart data) borrows it.

use std::path::PathBuf;

use chrono::NaiveDateTime;

/// Agent (estimator firm) identifier column.
pub const COL_ESTIMATOR: &str = "ESTIMATOR";
/// Analyst identifier column.
pub const COL_ANALYS: &str = "ANALYS";
/// Forecast period indicator column.
pub const COL_FPI: &str = "FPI";
/// Forecasted EPS column.
pub const COL_VALUE: &str = "VALUE";
/// Realized EPS column.
pub const COL_ACTUAL: &str = "ACTUAL";

/// The five columns that must parse as calendar timestamps.
pub const DATE_COLUMNS: [&str; 5] = ["ACTDATS", "ANNDATS", "REVDATS", "FPEDATS", "ANNDATS_ACT"];

/// Columns never included in the correlation matrix, even when numeric.
pub const CORRELATION_EXCLUDED: [&str; 3] = [COL_ESTIMATOR, COL_ANALYS, COL_FPI];

/// Every column the loader insists on.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_ESTIMATOR,
    COL_ANALYS,
    COL_FPI,
    COL_VALUE,
    COL_ACTUAL,
    "ACTDATS",
    "ANNDATS",
    "REVDATS",
    "FPEDATS",
    "ANNDATS_ACT",
];

/// Data path used when neither `--data` nor `EPSDASH_DATA` is given.
pub const DEFAULT_DATA_PATH: &str = "cleaned_aapl_forecast_data.csv";

/// Page title used when `--title` is not given.
pub const DEFAULT_TITLE: &str = "AAPL Analyst Forecast Analysis";

/// Calendar attributes of a forecast record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastDates {
    /// Activation date.
    pub activated: NaiveDateTime,
    /// Announcement date.
    pub announced: NaiveDateTime,
    /// Revision date.
    pub revised: NaiveDateTime,
    /// Fiscal period end.
    pub period_end: NaiveDateTime,
    /// Announcement date of the actual.
    pub actual_announced: NaiveDateTime,
}

impl ForecastDates {
    /// Dates in `DATE_COLUMNS` order.
    pub fn as_array(&self) -> [NaiveDateTime; 5] {
        [
            self.activated,
            self.announced,
            self.revised,
            self.period_end,
            self.actual_announced,
        ]
    }
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub estimator: String,
    pub analyst: String,
    pub fpi: String,
    /// Forecasted EPS. `NaN` when the cell was empty.
    pub value: f64,
    /// Realized EPS. `NaN` when the cell was empty.
    pub actual: f64,
    pub dates: ForecastDates,
    /// Raw cells of pass-through columns, aligned with `ForecastTable::extra_columns`.
    pub extras: Vec<String>,
}

/// How a column behaves for analysis purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Numeric,
    Date,
}

/// A column of the loaded file, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
}

/// The immutable, fully loaded dataset.
#[derive(Debug, Clone)]
pub struct ForecastTable {
    columns: Vec<ColumnInfo>,
    extra_columns: Vec<String>,
    records: Vec<ForecastRecord>,
}

impl ForecastTable {
    /// Assemble a table. `columns` lists every header in file order;
    /// `extra_columns` lists the pass-through ones in the order of
    /// `ForecastRecord::extras`.
    pub fn new(columns: Vec<ColumnInfo>, extra_columns: Vec<String>, records: Vec<ForecastRecord>) -> Self {
        Self {
            columns,
            extra_columns,
            records,
        }
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.kind)
    }

    /// Numeric columns eligible for the correlation matrix, in header order.
    pub fn correlation_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .filter(|c| !CORRELATION_EXCLUDED.contains(&c.name.as_str()))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Numeric value of `column` for `record`; `NaN` when missing or not numeric.
    pub fn numeric_cell(&self, record: &ForecastRecord, column: &str) -> f64 {
        match column {
            COL_VALUE => record.value,
            COL_ACTUAL => record.actual,
            COL_ESTIMATOR => parse_cell(&record.estimator),
            COL_ANALYS => parse_cell(&record.analyst),
            COL_FPI => parse_cell(&record.fpi),
            _ => self
                .extra_columns
                .iter()
                .position(|c| c == column)
                .and_then(|idx| record.extras.get(idx))
                .map(|s| parse_cell(s))
                .unwrap_or(f64::NAN),
        }
    }
}

/// Cells pandas reads as missing: empty, `NaN`/`nan`, `NA`, `N/A`, `null`.
pub fn is_missing_cell(s: &str) -> bool {
    const MARKERS: [&str; 4] = ["nan", "na", "n/a", "null"];
    let s = s.trim();
    s.is_empty() || MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m))
}

fn parse_cell(s: &str) -> f64 {
    if is_missing_cell(s) {
        return f64::NAN;
    }
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

/// Settings shared by every front-end.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    /// Forecast period requested on the command line, if any.
    pub fpi: Option<String>,
}
