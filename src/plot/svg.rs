//! SVG rendering of the dashboard charts.
//!
//! One document per chart group, mirroring the dashboard layout: the two
//! distributions side by side, the two box plots side by side, then the
//! scatter plot and the heatmap on their own.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::domain::Dashboard;
use crate::error::AppError;
use crate::plot::draw::{Theme, draw_boxplot, draw_distribution, draw_heatmap, draw_scatter};

const PAIR_SIZE: (u32, u32) = (1400, 560);
const SINGLE_SIZE: (u32, u32) = (900, 700);

pub const DISTRIBUTIONS_SVG: &str = "distributions.svg";
pub const BOXPLOTS_SVG: &str = "boxplots.svg";
pub const SCATTER_SVG: &str = "scatter.svg";
pub const CORRELATION_SVG: &str = "correlation.svg";

type SvgResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

/// Render all four chart documents into `dir` and return their paths.
pub fn write_svg_charts(dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>, AppError> {
    let theme = Theme::document();

    let targets: [(&str, fn(&Path, &Dashboard, &Theme) -> SvgResult); 4] = [
        (DISTRIBUTIONS_SVG, write_distributions),
        (BOXPLOTS_SVG, write_boxplots),
        (SCATTER_SVG, write_scatter),
        (CORRELATION_SVG, write_correlation),
    ];

    let mut written = Vec::with_capacity(targets.len());
    for (name, write) in targets {
        let path = dir.join(name);
        write(&path, dashboard, &theme)
            .map_err(|e| AppError::new(4, format!("Failed to render '{}': {e}", path.display())))?;
        log::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn write_distributions(path: &Path, dashboard: &Dashboard, theme: &Theme) -> SvgResult {
    let root = SVGBackend::new(path, PAIR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(PAIR_SIZE.0 / 2);
    draw_distribution(&left, &dashboard.distributions[0], theme)?;
    draw_distribution(&right, &dashboard.distributions[1], theme)?;
    root.present()
}

fn write_boxplots(path: &Path, dashboard: &Dashboard, theme: &Theme) -> SvgResult {
    let root = SVGBackend::new(path, PAIR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(PAIR_SIZE.0 / 2);
    draw_boxplot(&left, &dashboard.boxplots[0], theme)?;
    draw_boxplot(&right, &dashboard.boxplots[1], theme)?;
    root.present()
}

fn write_scatter(path: &Path, dashboard: &Dashboard, theme: &Theme) -> SvgResult {
    let root = SVGBackend::new(path, SINGLE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_scatter(&root, &dashboard.scatter, theme)?;
    root.present()
}

fn write_correlation(path: &Path, dashboard: &Dashboard, theme: &Theme) -> SvgResult {
    let root = SVGBackend::new(path, SINGLE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    draw_heatmap(&root, &dashboard.correlation, theme)?;
    root.present()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_dashboard;
    use crate::io::ingest::read_forecast_table;

    const DATA: &str = "ESTIMATOR,ANALYS,FPI,VALUE,ACTUAL,ACTDATS,ANNDATS,REVDATS,FPEDATS,ANNDATS_ACT\n\
        1,10,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        2,20,6,2.0,1.9,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        3,30,6,2.4,2.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n";

    #[test]
    fn writes_four_svg_documents() {
        let dir = tempfile::tempdir().unwrap();
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        let dash = build_dashboard(&table, "6");

        let written = write_svg_charts(dir.path(), &dash).unwrap();
        assert_eq!(written.len(), 4);
        for path in &written {
            let body = std::fs::read_to_string(path).unwrap();
            assert!(body.contains("<svg"), "{} is not an SVG", path.display());
        }
    }

    #[test]
    fn empty_selection_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let table = read_forecast_table(DATA.as_bytes()).unwrap();
        let dash = build_dashboard(&table, "99");

        let written = write_svg_charts(dir.path(), &dash).unwrap();
        let heatmap = std::fs::read_to_string(&written[3]).unwrap();
        assert!(heatmap.contains("n/a"));
    }
}
