//! Render-ready chart data.
//!
//! Everything a surface (terminal, text report, SVG) draws is computed up front
//! into these plain values. They serialize to JSON so a run can be exported and
//! compared byte-for-byte with another run.

use serde::{Deserialize, Serialize};

/// Histogram bars: `edges.len() == counts.len() + 1` unless both are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_width(&self) -> Option<f64> {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => Some((hi - lo) / self.counts.len() as f64),
            _ => None,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Distribution of one field: histogram plus a smoothed density overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionChart {
    pub field: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: Histogram,
    /// KDE curve scaled to counts; empty when it cannot be estimated.
    pub kde: Vec<(f64, f64)>,
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub n: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotChart {
    pub field: String,
    pub title: String,
    pub x_label: String,
    /// `None` when the field has no values in the view.
    pub stats: Option<BoxStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// Square, symmetric Pearson correlation matrix (row-major).
///
/// `NaN` cells (serialized as `null`) mark pairs that cannot be correlated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationChart {
    pub title: String,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationChart {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

/// All data-dependent output for one forecast-period selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub fpi: String,
    pub row_count: usize,
    /// Forecasted then actual.
    pub distributions: [DistributionChart; 2],
    /// Forecasted then actual.
    pub boxplots: [BoxPlotChart; 2],
    pub scatter: ScatterChart,
    pub correlation: CorrelationChart,
}

impl Dashboard {
    pub fn univariate_heading(&self) -> String {
        format!("Univariate Analysis: Distribution of EPS Values for FPI = {}", self.fpi)
    }

    pub fn bivariate_heading(&self) -> String {
        format!("Bivariate Analysis: Forecasted vs Actual EPS for FPI = {}", self.fpi)
    }

    pub fn multivariate_heading(&self) -> String {
        format!("Multivariate Analysis: Correlation Heatmap for FPI = {}", self.fpi)
    }
}
