//! Box-plot statistics (Tukey whiskers at 1.5 × IQR).

use crate::domain::BoxStats;
use crate::math::stats::{quantile_sorted, sorted_finite};

/// Whisker reach in multiples of the inter-quartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Compute box-plot statistics; `None` when there are no finite values.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let sorted = sorted_finite(values);
    let q1 = quantile_sorted(&sorted, 0.25)?;
    let median = quantile_sorted(&sorted, 0.5)?;
    let q3 = quantile_sorted(&sorted, 0.75)?;

    let iqr = q3 - q1;
    let lo_limit = q1 - WHISKER_IQR * iqr;
    let hi_limit = q3 + WHISKER_IQR * iqr;

    // Whiskers stop at the most extreme data points still inside the limits.
    let whisker_low = sorted.iter().copied().find(|&v| v >= lo_limit).unwrap_or(q1).min(q1);
    let whisker_high = sorted.iter().rev().copied().find(|&v| v <= hi_limit).unwrap_or(q3).max(q3);

    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < whisker_low || v > whisker_high)
        .collect();

    Some(BoxStats {
        n: sorted.len(),
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}
