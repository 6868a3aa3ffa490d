//! Filtered views over the loaded table.

use crate::domain::{ForecastRecord, ForecastTable};

/// A borrowed row subset of a `ForecastTable`.
///
/// The view stores row indices only; it is rebuilt from scratch for every
/// selection and never mutates the table.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a ForecastTable,
    rows: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn table(&self) -> &'a ForecastTable {
        self.table
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a ForecastRecord> + '_ {
        let records = self.table.records();
        self.rows.iter().map(move |&idx| &records[idx])
    }

    /// Values of a numeric column over the view (`NaN` for missing cells).
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        self.records().map(|r| self.table.numeric_cell(r, column)).collect()
    }
}

/// Rows whose `FPI` equals `fpi` exactly. An unknown code yields an empty view.
pub fn filter_by_fpi<'a>(table: &'a ForecastTable, fpi: &str) -> FilteredView<'a> {
    let rows = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.fpi == fpi)
        .map(|(idx, _)| idx)
        .collect();
    FilteredView { table, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_forecast_table;

    const DATA: &str = "ESTIMATOR,ANALYS,FPI,VALUE,ACTUAL,ACTDATS,ANNDATS,REVDATS,FPEDATS,ANNDATS_ACT\n\
        1,10,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        2,20,6,2.0,1.9,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        3,30,1,0.5,0.4,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n";

    #[test]
    fn filter_is_exact_and_complete() {
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        for fpi in ["6", "1"] {
            let view = filter_by_fpi(&table, fpi);
            let expected = table.records().iter().filter(|r| r.fpi == fpi).count();
            assert_eq!(view.len(), expected);
            assert!(view.records().all(|r| r.fpi == fpi));
        }
    }

    #[test]
    fn unknown_value_is_empty() {
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        let view = filter_by_fpi(&table, "9");
        assert!(view.is_empty());
        assert!(view.numeric_column("VALUE").is_empty());
    }

    #[test]
    fn view_preserves_row_order() {
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        let view = filter_by_fpi(&table, "6");
        assert_eq!(view.row_indices(), &[0, 1]);
        assert_eq!(view.numeric_column("ACTUAL"), vec![1.6, 1.9]);
    }
}
