//! Formatted terminal output for the `report` command.
//!
//! We keep formatting code in one place so:
//! - the chart-data code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{CorrelationChart, Dashboard};
use crate::plot::{render_boxplot_ascii, render_histogram_ascii, render_scatter_ascii};
use crate::report::narrative;

/// Plot sizing for the text report.
#[derive(Debug, Clone, Copy)]
pub struct ReportLayout {
    pub width: usize,
    pub height: usize,
}

/// Format the whole dashboard: narrative, charts and correlation table in the
/// fixed page order.
pub fn format_dashboard(dashboard: &Dashboard, title: &str, layout: ReportLayout) -> String {
    let mut out = String::new();

    out.push_str(&heading(title, '='));
    out.push_str(&section(narrative::INTRODUCTION_HEADING, narrative::INTRODUCTION));
    out.push_str(&section(narrative::EXPLORATION_HEADING, narrative::EXPLORATION));
    out.push_str(&format!("Forecast Period (FPI): {} | rows: {}\n\n", dashboard.fpi, dashboard.row_count));

    out.push_str(&heading(&dashboard.univariate_heading(), '-'));
    for chart in &dashboard.distributions {
        out.push_str(&render_histogram_ascii(chart, layout.width, layout.height));
        out.push('\n');
    }
    for chart in &dashboard.boxplots {
        out.push_str(&render_boxplot_ascii(chart, layout.width));
        out.push('\n');
    }

    out.push_str(&heading(&dashboard.bivariate_heading(), '-'));
    out.push_str(&render_scatter_ascii(&dashboard.scatter, layout.width, layout.height));
    out.push('\n');

    out.push_str(&heading(&dashboard.multivariate_heading(), '-'));
    out.push_str(&format_correlation_table(&dashboard.correlation));
    out.push('\n');

    out.push_str(&section(narrative::INSIGHTS_HEADING, &narrative::insights_text()));
    out.push_str(&section(
        narrative::RECOMMENDATIONS_HEADING,
        &narrative::recommendations_text(),
    ));

    out
}

/// Annotated correlation matrix as a text table (two decimals, `n/a` for
/// undefined pairs).
pub fn format_correlation_table(chart: &CorrelationChart) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.columns.is_empty() {
        out.push_str("(no numeric columns)\n");
        return out;
    }

    let label_w = chart.columns.iter().map(|c| c.chars().count()).max().unwrap_or(0).max(4);
    let cell_w = label_w.max(6);

    let mut header = format!("{:<label_w$}", "");
    for name in &chart.columns {
        header.push_str(&format!(" {:>cell_w$}", truncate(name, cell_w)));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (i, name) in chart.columns.iter().enumerate() {
        let mut line = format!("{name:<label_w$}");
        for j in 0..chart.size() {
            let cell = chart.get(i, j).map(fmt_corr).unwrap_or_default();
            line.push_str(&format!(" {cell:>cell_w$}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Two-decimal annotation used by every heatmap surface.
pub fn fmt_corr(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "n/a".to_string()
    }
}

fn heading(text: &str, underline: char) -> String {
    let rule: String = std::iter::repeat_n(underline, text.chars().count()).collect();
    format!("{text}\n{rule}\n\n")
}

fn section(title: &str, body: &str) -> String {
    let mut out = heading(title, '-');
    out.push_str(body.trim_end());
    out.push_str("\n\n");
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
