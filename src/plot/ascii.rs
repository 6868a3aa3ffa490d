//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - histogram bars: `#`, density overlay: `*`
//! - box plot: `|` whisker caps, `-` whiskers, `[`/`]` box, `=` body,
//!   `:` median, `o` outliers
//! - scatter points: `o`

use crate::domain::{BoxPlotChart, DistributionChart, ScatterChart};

const NO_DATA: &str = "(no data)\n";

/// Render a histogram with its KDE overlay.
pub fn render_histogram_ascii(chart: &DistributionChart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = format!("{}\n", chart.title);
    let h = &chart.histogram;
    let (Some(&x_min), Some(&x_max), Some(bin_width)) = (h.edges.first(), h.edges.last(), h.bin_width()) else {
        out.push_str(NO_DATA);
        return out;
    };

    let kde_max = chart.kde.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y_max = (h.max_count() as f64).max(kde_max).max(1.0);

    let mut grid = vec![vec![' '; width]; height];

    for col in 0..width {
        let x = x_min + (col as f64 + 0.5) / width as f64 * (x_max - x_min);
        let bin = (((x - x_min) / bin_width).floor() as usize).min(h.counts.len() - 1);
        let count = h.counts[bin];
        if count == 0 {
            continue;
        }
        let top = map_y(count as f64, 0.0, y_max, height);
        for row in grid.iter_mut().skip(top) {
            row[col] = '#';
        }
    }

    for &(x, y) in &chart.kde {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, 0.0, y_max, height);
        grid[row][col] = '*';
    }

    out.push_str(&format!(
        "{}=[{x_min:.3}, {x_max:.3}] | {}=[0, {y_max:.1}]\n",
        chart.x_label, chart.y_label
    ));
    push_grid(&mut out, grid);
    out
}

/// Render a horizontal box plot on a single line.
pub fn render_boxplot_ascii(chart: &BoxPlotChart, width: usize) -> String {
    let width = width.max(10);

    let mut out = format!("{}\n", chart.title);
    let Some(s) = &chart.stats else {
        out.push_str(NO_DATA);
        return out;
    };

    let lo = s.outliers.iter().copied().fold(s.whisker_low, f64::min);
    let hi = s.outliers.iter().copied().fold(s.whisker_high, f64::max);
    let (lo, hi) = pad_range(lo, hi, 0.05);

    let mut line = vec![' '; width];
    let x_wl = map_x(s.whisker_low, lo, hi, width);
    let x_q1 = map_x(s.q1, lo, hi, width);
    let x_q3 = map_x(s.q3, lo, hi, width);
    let x_wh = map_x(s.whisker_high, lo, hi, width);

    for cell in line.iter_mut().take(x_q1).skip(x_wl) {
        *cell = '-';
    }
    for cell in line.iter_mut().take(x_wh + 1).skip(x_q3) {
        *cell = '-';
    }
    for cell in line.iter_mut().take(x_q3).skip(x_q1) {
        *cell = '=';
    }
    line[x_wl] = '|';
    line[x_wh] = '|';
    line[x_q1] = '[';
    line[x_q3] = ']';
    line[map_x(s.median, lo, hi, width)] = ':';
    for &o in &s.outliers {
        line[map_x(o, lo, hi, width)] = 'o';
    }

    out.push_str(&format!(
        "{}: n={} q1={:.3} median={:.3} q3={:.3} whiskers=[{:.3}, {:.3}] outliers={}\n",
        chart.x_label,
        s.n,
        s.q1,
        s.median,
        s.q3,
        s.whisker_low,
        s.whisker_high,
        s.outliers.len()
    ));
    out.push_str(&line.into_iter().collect::<String>());
    out.push('\n');
    out
}

/// Render a scatter plot.
pub fn render_scatter_ascii(chart: &ScatterChart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = format!("{}\n", chart.title);
    let (Some((x_min, x_max)), Some((y_min, y_max))) = (
        data_range(chart.points.iter().map(|p| p.0)),
        data_range(chart.points.iter().map(|p| p.1)),
    ) else {
        out.push_str(NO_DATA);
        return out;
    };
    let (x_min, x_max) = pad_range(x_min, x_max, 0.05);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    for &(x, y) in &chart.points {
        grid[map_y(y, y_min, y_max, height)][map_x(x, x_min, x_max, width)] = 'o';
    }

    out.push_str(&format!(
        "Plot: {}=[{x_min:.3}, {x_max:.3}] | {}=[{y_min:.3}, {y_max:.3}]\n",
        chart.x_label, chart.y_label
    ));
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

/// Finite min/max; a zero-width range is widened to one unit.
fn data_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    if max > min {
        Some((min, max))
    } else {
        Some((min - 0.5, max + 0.5))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    if span == 0.0 {
        return (min - 0.5, max + 0.5);
    }
    let pad = span * frac;
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}
