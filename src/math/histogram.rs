//! Histogram binning and kernel density estimation.
//!
//! Binning follows the numpy "auto" rule (the larger bin count of Sturges and
//! Freedman–Diaconis) so the charts look like the usual notebook output.

use crate::domain::Histogram;
use crate::math::stats::{quantile_sorted, sample_std, sorted_finite};

/// Number of points the KDE curve is evaluated at.
pub const KDE_GRID_POINTS: usize = 200;

/// Largest Freedman–Diaconis bin count accepted; a near-zero IQR (float
/// noise around a repeated value) falls back to Sturges.
pub const MAX_FD_BINS: f64 = 10_000.0;

/// Bin `values` (non-finite entries are skipped).
pub fn histogram(values: &[f64]) -> Histogram {
    let sorted = sorted_finite(values);
    let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
        return Histogram::default();
    };

    // A single distinct value gets one unit-wide bin centred on it.
    if hi <= lo {
        return Histogram {
            edges: vec![lo - 0.5, hi + 0.5],
            counts: vec![sorted.len()],
        };
    }

    let n_bins = auto_bin_count(&sorted, hi - lo);
    let width = (hi - lo) / n_bins as f64;
    let edges: Vec<f64> = (0..=n_bins)
        .map(|i| if i == n_bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; n_bins];
    for &v in &sorted {
        let idx = (((v - lo) / width).floor() as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

fn auto_bin_count(sorted: &[f64], range: f64) -> usize {
    let n = sorted.len() as f64;
    let sturges_width = range / (n.log2() + 1.0);

    let iqr = match (quantile_sorted(sorted, 0.75), quantile_sorted(sorted, 0.25)) {
        (Some(q3), Some(q1)) => q3 - q1,
        _ => 0.0,
    };
    let fd_width = 2.0 * iqr * n.powf(-1.0 / 3.0);

    let width = if fd_width > 0.0 && range / fd_width <= MAX_FD_BINS {
        fd_width.min(sturges_width)
    } else {
        sturges_width
    };

    ((range / width).ceil() as usize).max(1)
}

/// Gaussian KDE (Scott bandwidth) evaluated over the data range and scaled to
/// histogram counts (`density * n * bin_width`).
///
/// Returns an empty curve with fewer than two values or zero spread.
pub fn kde_curve(values: &[f64], bin_width: f64) -> Vec<(f64, f64)> {
    let sorted = sorted_finite(values);
    let n = sorted.len();
    if n < 2 || !(bin_width.is_finite() && bin_width > 0.0) {
        return Vec::new();
    }
    let Some(std) = sample_std(&sorted) else {
        return Vec::new();
    };
    if std <= 0.0 {
        return Vec::new();
    }

    let bandwidth = std * (n as f64).powf(-0.2);
    let lo = sorted[0];
    let hi = sorted[n - 1];
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n as f64 * bin_width;

    (0..KDE_GRID_POINTS)
        .map(|i| {
            let u = i as f64 / (KDE_GRID_POINTS as f64 - 1.0);
            let x = lo + u * (hi - lo);
            let density: f64 = sorted
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_empty_histogram() {
        let h = histogram(&[f64::NAN]);
        assert!(h.is_empty());
        assert!(h.edges.is_empty());
    }

    #[test]
    fn constant_input_gives_single_bin() {
        let h = histogram(&[2.0, 2.0, 2.0]);
        assert_eq!(h.edges, vec![1.5, 2.5]);
        assert_eq!(h.counts, vec![3]);
    }

    #[test]
    fn float_noise_iqr_falls_back_to_sturges() {
        let mut values = vec![0.5, 3.1];
        values.extend(std::iter::repeat_n(1.23, 40));
        values.extend(std::iter::repeat_n(1.2300000000000002, 40));

        let h = histogram(&values);
        // Sturges: ceil(log2(82) + 1) = 8.
        assert_eq!(h.counts.len(), 8);
        assert_eq!(h.total(), 82);
        assert_eq!(h.edges.first(), Some(&0.5));
        assert_eq!(h.edges.last(), Some(&3.1));
    }

    #[test]
    fn counts_cover_every_value() {
        let values: Vec<f64> = (0..100).map(|i| (i as f64 * 0.37).sin() * 3.0).collect();
        let h = histogram(&values);
        assert_eq!(h.total(), 100);
        assert_eq!(h.edges.len(), h.counts.len() + 1);
        assert!(h.edges.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn auto_rule_matches_numpy_for_small_sample() {
        // numpy.histogram_bin_edges([1, 2, 3, 4, 5, 6, 7, 8, 9, 10], "auto") has 5 bins.
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let h = histogram(&values);
        assert_eq!(h.counts, vec![2, 2, 2, 2, 2]);
        assert!((h.bin_width().unwrap() - 1.8).abs() < 1e-12);
    }

    #[test]
    fn kde_spans_data_range() {
        let values = [1.0, 1.5, 2.0, 2.5, 3.0, 2.2, 1.8];
        let width = 0.5;
        let curve = kde_curve(&values, width);
        assert_eq!(curve.len(), KDE_GRID_POINTS);
        assert!(curve.iter().all(|&(_, y)| y.is_finite() && y >= 0.0));
        assert_eq!(curve.first().map(|p| p.0), Some(1.0));
        assert_eq!(curve.last().map(|p| p.0), Some(3.0));
    }

    #[test]
    fn kde_needs_spread() {
        assert!(kde_curve(&[1.0], 0.5).is_empty());
        assert!(kde_curve(&[1.0, 1.0, 1.0], 0.5).is_empty());
    }
}
