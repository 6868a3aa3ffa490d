//! Plotters-powered dashboard chart widget for Ratatui.
//!
//! The drawing itself lives in `plot::draw` and is shared with the SVG
//! exporter; this widget only adapts it to a terminal buffer through
//! `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{BoxPlotChart, CorrelationChart, DistributionChart, ScatterChart};
use crate::plot::Theme;
use crate::plot::draw::{draw_boxplot, draw_distribution, draw_heatmap, draw_scatter};

/// Which chart to draw. All data is computed before rendering.
#[derive(Debug, Clone, Copy)]
pub enum DashboardChart<'a> {
    Distribution(&'a DistributionChart),
    BoxPlot(&'a BoxPlotChart),
    Scatter(&'a ScatterChart),
    Heatmap(&'a CorrelationChart),
}

impl Widget for DashboardChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        // Pixel markers only: the backend maps circle radii to canvas units
        // and draws them far too large.
        let theme = Theme::terminal();

        let widget = widget_fn(move |root| {
            match self {
                DashboardChart::Distribution(chart) => draw_distribution(&root, chart, &theme)?,
                DashboardChart::BoxPlot(chart) => draw_boxplot(&root, chart, &theme)?,
                DashboardChart::Scatter(chart) => draw_scatter(&root, chart, &theme)?,
                DashboardChart::Heatmap(chart) => draw_heatmap(&root, chart, &theme)?,
            }
            Ok(())
        });

        widget.render(area, buf);
    }
}
