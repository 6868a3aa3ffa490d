//! Pearson correlation matrix.
//!
//! Columns may contain `NaN` for missing cells. Each pair of columns is
//! correlated over the rows where both are finite (pairwise-complete
//! observations). Pairs that cannot be correlated (fewer than two complete
//! rows, or a constant column) yield `NaN`.

use nalgebra::{DMatrix, DVector};

/// Correlation matrix of `columns` (each inner slice is one variable).
///
/// The result is symmetric; the diagonal is exactly `1.0` for every column
/// with nonzero variance and `NaN` otherwise.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> DMatrix<f64> {
    let k = columns.len();
    let mut out = DMatrix::from_element(k, k, f64::NAN);

    for i in 0..k {
        for j in i..k {
            let r = if i == j {
                if has_variance(&columns[i]) { 1.0 } else { f64::NAN }
            } else {
                pearson(&columns[i], &columns[j])
            };
            out[(i, j)] = r;
            out[(j, i)] = r;
        }
    }

    out
}

/// Pearson correlation over pairwise-complete observations.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();

    if xs.len() < 2 {
        return f64::NAN;
    }

    let xs = DVector::from_vec(xs);
    let ys = DVector::from_vec(ys);
    let xc = xs.add_scalar(-xs.mean());
    let yc = ys.add_scalar(-ys.mean());

    let sxx = xc.dot(&xc);
    let syy = yc.dot(&yc);
    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }

    (xc.dot(&yc) / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

fn has_variance(values: &[f64]) -> bool {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let Some(first) = finite.next() else {
        return false;
    };
    finite.any(|v| v != first)
}
