//! Shared "dashboard pipeline" logic used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! filter -> distributions -> box plots -> scatter -> correlation
//!
//! The TUI, the text report and the exporter only present what
//! `build_dashboard` returns. It is a pure function of the loaded table and
//! the selection, so calling it twice with the same inputs gives identical
//! output.

use log::{debug, warn};

use crate::app::selector::FpiSelector;
use crate::app::view::{FilteredView, filter_by_fpi};
use crate::domain::{
    BoxPlotChart, COL_ACTUAL, COL_VALUE, CorrelationChart, Dashboard, DashboardConfig, DistributionChart,
    ForecastTable, ScatterChart,
};
use crate::error::AppError;
use crate::io::ingest::load_forecast_table;
use crate::math::{box_stats, correlation_matrix, histogram, kde_curve};

/// A loaded dataset plus the current selection and its dashboard.
///
/// The table is read once; every selection change only rebuilds `dashboard`.
#[derive(Debug)]
pub struct Session {
    pub config: DashboardConfig,
    pub table: ForecastTable,
    pub selector: FpiSelector,
    pub dashboard: Dashboard,
}

impl Session {
    /// Load the table and build the dashboard for the requested (or first)
    /// forecast period.
    ///
    /// A requested period that is absent from the data is still honoured: the
    /// view is empty and the selector keeps its default.
    pub fn open(config: DashboardConfig) -> Result<Self, AppError> {
        let table = load_forecast_table(&config.data_path)?;
        let mut selector = FpiSelector::new(&table);

        let fpi = match config.fpi.as_deref() {
            Some(requested) => {
                if !selector.select(requested) {
                    warn!("FPI {requested} does not occur in {}", config.data_path.display());
                }
                requested.to_string()
            }
            None => selector.selected().unwrap_or_default().to_string(),
        };

        let dashboard = build_dashboard(&table, &fpi);
        Ok(Self {
            config,
            table,
            selector,
            dashboard,
        })
    }

    /// Whether the dashboard shows the selector's current choice.
    pub fn is_in_sync(&self) -> bool {
        self.selector.selected().unwrap_or_default() == self.dashboard.fpi
    }

    /// Rebuild the dashboard for the selector's current choice.
    pub fn on_selection_change(&mut self) {
        let fpi = self.selector.selected().unwrap_or_default();
        self.dashboard = build_dashboard(&self.table, fpi);
    }
}

/// Build every data-dependent chart for the rows where `FPI == fpi`.
pub fn build_dashboard(table: &ForecastTable, fpi: &str) -> Dashboard {
    let view = filter_by_fpi(table, fpi);
    debug!("FPI={fpi}: {} of {} rows selected", view.len(), table.len());

    let forecast = view.numeric_column(COL_VALUE);
    let actual = view.numeric_column(COL_ACTUAL);

    Dashboard {
        fpi: fpi.to_string(),
        row_count: view.len(),
        distributions: [
            distribution_chart(COL_VALUE, "Distribution of Forecasted EPS (VALUE)", "Forecasted EPS", &forecast),
            distribution_chart(COL_ACTUAL, "Distribution of Actual EPS (ACTUAL)", "Actual EPS", &actual),
        ],
        boxplots: [
            boxplot_chart(COL_VALUE, "Box Plot of Forecasted EPS (VALUE)", "Forecasted EPS", &forecast),
            boxplot_chart(COL_ACTUAL, "Box Plot of Actual EPS (ACTUAL)", "Actual EPS", &actual),
        ],
        scatter: scatter_chart(&forecast, &actual),
        correlation: correlation_chart(&view),
    }
}

fn distribution_chart(field: &str, title: &str, x_label: &str, values: &[f64]) -> DistributionChart {
    let histogram = histogram(values);
    let kde = histogram
        .bin_width()
        .map(|width| kde_curve(values, width))
        .unwrap_or_default();

    DistributionChart {
        field: field.to_string(),
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: "Frequency".to_string(),
        histogram,
        kde,
    }
}

fn boxplot_chart(field: &str, title: &str, x_label: &str, values: &[f64]) -> BoxPlotChart {
    BoxPlotChart {
        field: field.to_string(),
        title: title.to_string(),
        x_label: x_label.to_string(),
        stats: box_stats(values),
    }
}

fn scatter_chart(forecast: &[f64], actual: &[f64]) -> ScatterChart {
    let points = forecast
        .iter()
        .zip(actual)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    ScatterChart {
        title: "Scatter Plot of Forecasted EPS (VALUE) vs Actual EPS (ACTUAL)".to_string(),
        x_label: "Forecasted EPS (VALUE)".to_string(),
        y_label: "Actual EPS (ACTUAL)".to_string(),
        points,
    }
}

/// Correlation over the table's numeric columns minus identifier and period
/// columns. The column set comes from the whole table so it does not change
/// with the selection.
fn correlation_chart(view: &FilteredView<'_>) -> CorrelationChart {
    let columns = view.table().correlation_columns();
    let data: Vec<Vec<f64>> = columns.iter().map(|c| view.numeric_column(c)).collect();
    let matrix = correlation_matrix(&data);

    let values = (0..matrix.nrows())
        .map(|i| matrix.row(i).iter().copied().collect())
        .collect();

    CorrelationChart {
        title: "Correlation Heatmap of Numerical Variables".to_string(),
        columns,
        values,
    }
}
