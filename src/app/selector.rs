//! Forecast-period selector state.
//!
//! Holds the distinct `FPI` codes (in order of first appearance) and the index
//! of the current choice. The selector never touches the table again after
//! construction; changing the choice is the caller's cue to rebuild the
//! dashboard.

use crate::domain::ForecastTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpiSelector {
    options: Vec<String>,
    selected: usize,
}

impl FpiSelector {
    /// Build the choice set from the loaded table. The first encountered code
    /// is selected.
    pub fn new(table: &ForecastTable) -> Self {
        Self::from_options(distinct_fpi_values(table))
    }

    pub fn from_options(options: Vec<String>) -> Self {
        Self { options, selected: 0 }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Current code, or `None` for a table without rows.
    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Select `value` if it is one of the options.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o == value) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Move to the next option (wrapping). Returns whether the choice changed.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Move to the previous option (wrapping). Returns whether the choice changed.
    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let n = self.options.len();
        if n < 2 {
            return false;
        }
        let next = (self.selected as isize + delta).rem_euclid(n as isize) as usize;
        self.selected = next;
        true
    }
}

/// Distinct `FPI` values in order of first appearance.
pub fn distinct_fpi_values(table: &ForecastTable) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for record in table.records() {
        if !out.iter().any(|v| v == &record.fpi) {
            out.push(record.fpi.clone());
        }
    }
    out
}
