//! Descriptive statistics shared by the chart builders.
//!
//! All functions ignore non-finite inputs, so callers can pass raw columns
//! with `NaN` for missing cells.

/// Finite values of `values`, sorted ascending.
pub fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Quantile of an ascending slice using linear interpolation between the two
/// nearest ranks (`p` in `[0, 1]`).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Sample standard deviation (`n - 1` denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let (ss, n) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + (v - m) * (v - m), n + 1));
    if n < 2 { None } else { Some((ss / (n - 1) as f64).sqrt()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_interpolate() {
        let v = sorted_finite(&[4.0, 1.0, f64::NAN, 3.0, 2.0]);
        assert_eq!(v, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(quantile_sorted(&v, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&v, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&v, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn std_uses_sample_denominator() {
        let s = sample_std(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((s - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
    }
}
