//! Plotters drawing routines shared by the TUI and the SVG exporter.
//!
//! Every function draws one chart onto a caller-provided drawing area and is
//! generic over the Plotters backend. The chart data is computed elsewhere;
//! these functions only map it to primitives.

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::domain::{BoxPlotChart, CorrelationChart, DistributionChart, ScatterChart};
use crate::report::fmt_corr;

pub type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

type Ctx2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// How scatter points and outliers are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// One backend pixel. Terminal cells are coarse, so a dot reads best.
    Pixel,
    /// Filled circle with the given radius in pixels.
    Circle(u32),
}

/// Colours, fonts and spacing for one drawing surface.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub foreground: RGBColor,
    pub bar: RGBColor,
    pub line: RGBColor,
    pub point: RGBColor,
    pub font_size: f64,
    pub captions: bool,
    pub marker: Marker,
    pub margin: u32,
    pub left_area: u32,
    pub bottom_area: u32,
}

impl Theme {
    /// High-contrast palette for terminal rendering; titles live in the
    /// surrounding Ratatui blocks.
    pub fn terminal() -> Self {
        Self {
            foreground: WHITE,
            bar: RGBColor(0, 255, 255),
            line: RGBColor(255, 255, 0),
            point: WHITE,
            font_size: 10.0,
            captions: false,
            marker: Marker::Pixel,
            margin: 1,
            left_area: 6,
            bottom_area: 3,
        }
    }

    /// Print-style palette for SVG documents.
    pub fn document() -> Self {
        Self {
            foreground: BLACK,
            bar: RGBColor(76, 114, 176),
            line: RGBColor(221, 132, 82),
            point: RGBColor(76, 114, 176),
            font_size: 14.0,
            captions: true,
            marker: Marker::Circle(4),
            margin: 16,
            left_area: 60,
            bottom_area: 50,
        }
    }

    fn font(&self, scale: f64) -> TextStyle<'static> {
        FontDesc::new(FontFamily::SansSerif, self.font_size * scale, FontStyle::Normal).color(&self.foreground)
    }

    fn builder<'a, 'b, DB: DrawingBackend>(
        &self,
        root: &'a DrawingArea<DB, Shift>,
        title: &str,
        left_area: u32,
    ) -> ChartBuilder<'a, 'b, DB> {
        let mut builder = ChartBuilder::on(root);
        builder
            .margin(self.margin)
            .set_label_area_size(LabelAreaPosition::Left, left_area)
            .set_label_area_size(LabelAreaPosition::Bottom, self.bottom_area);
        if self.captions {
            builder.caption(title, self.font(1.3));
        }
        builder
    }
}

/// Histogram bars with the KDE curve on top.
pub fn draw_distribution<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &DistributionChart,
    theme: &Theme,
) -> DrawResult<DB> {
    let h = &chart.histogram;
    let (x0, x1) = match (h.edges.first(), h.edges.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        _ => (0.0, 1.0),
    };
    let kde_max = chart.kde.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y1 = (h.max_count() as f64).max(kde_max).max(1.0) * 1.05;

    let mut ctx = theme
        .builder(root, &chart.title, theme.left_area)
        .build_cartesian_2d(x0..x1, 0.0..y1)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(5)
        .y_labels(5)
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style(theme.font(1.0))
        .axis_desc_style(theme.font(1.0))
        .axis_style(theme.foreground)
        .bold_line_style(theme.foreground)
        .draw()?;

    if h.is_empty() {
        return draw_note(&ctx, "no data", theme);
    }

    ctx.draw_series(h.counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new([(h.edges[i], 0.0), (h.edges[i + 1], count as f64)], theme.bar.mix(0.6).filled())
    }))?;
    ctx.draw_series(h.counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new([(h.edges[i], 0.0), (h.edges[i + 1], count as f64)], theme.foreground)
    }))?;

    if !chart.kde.is_empty() {
        ctx.draw_series(LineSeries::new(chart.kde.iter().copied(), theme.line.stroke_width(2)))?;
    }

    Ok(())
}

/// Horizontal box plot (box, median, whiskers, outliers).
pub fn draw_boxplot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &BoxPlotChart,
    theme: &Theme,
) -> DrawResult<DB> {
    let (x0, x1) = match &chart.stats {
        Some(s) => {
            let lo = s.outliers.iter().copied().fold(s.whisker_low, f64::min);
            let hi = s.outliers.iter().copied().fold(s.whisker_high, f64::max);
            padded(lo, hi)
        }
        None => (0.0, 1.0),
    };

    let mut ctx = theme
        .builder(root, &chart.title, theme.left_area)
        .build_cartesian_2d(x0..x1, -1.0..1.0)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_label.as_str())
        .x_labels(5)
        .y_labels(1)
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|_| String::new())
        .label_style(theme.font(1.0))
        .axis_desc_style(theme.font(1.0))
        .axis_style(theme.foreground)
        .bold_line_style(theme.foreground)
        .draw()?;

    let Some(s) = &chart.stats else {
        return draw_note(&ctx, "no data", theme);
    };

    let body = [(s.q1, -0.4), (s.q3, 0.4)];
    ctx.draw_series(std::iter::once(Rectangle::new(body, theme.bar.mix(0.6).filled())))?;
    ctx.draw_series(std::iter::once(Rectangle::new(body, theme.foreground)))?;

    let segments = vec![
        vec![(s.median, -0.4), (s.median, 0.4)],
        vec![(s.whisker_low, 0.0), (s.q1, 0.0)],
        vec![(s.q3, 0.0), (s.whisker_high, 0.0)],
        vec![(s.whisker_low, -0.2), (s.whisker_low, 0.2)],
        vec![(s.whisker_high, -0.2), (s.whisker_high, 0.2)],
    ];
    ctx.draw_series(segments.into_iter().map(|pts| PathElement::new(pts, theme.foreground)))?;

    let outliers: Vec<(f64, f64)> = s.outliers.iter().map(|&o| (o, 0.0)).collect();
    draw_markers(&mut ctx, &outliers, theme)
}

/// Forecast (x) vs actual (y) scatter.
pub fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &ScatterChart,
    theme: &Theme,
) -> DrawResult<DB> {
    let (x0, x1) = padded_or_unit(chart.points.iter().map(|p| p.0));
    let (y0, y1) = padded_or_unit(chart.points.iter().map(|p| p.1));

    let mut ctx = theme
        .builder(root, &chart.title, theme.left_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(5)
        .y_labels(5)
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style(theme.font(1.0))
        .axis_desc_style(theme.font(1.0))
        .axis_style(theme.foreground)
        .bold_line_style(theme.foreground)
        .draw()?;

    if chart.points.is_empty() {
        return draw_note(&ctx, "no data", theme);
    }
    draw_markers(&mut ctx, &chart.points, theme)
}

/// Annotated correlation heatmap. Cell centres sit on integer coordinates so
/// the axis labels can name the columns.
pub fn draw_heatmap<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &CorrelationChart,
    theme: &Theme,
) -> DrawResult<DB> {
    let n = chart.size();
    let longest = chart.columns.iter().map(|c| c.chars().count()).max().unwrap_or(0) as f64;
    let left_area = theme.left_area.max((longest * theme.font_size * 0.7) as u32 + 10);
    let extent = n.max(1) as f64 - 0.5;

    let mut ctx = theme
        .builder(root, &chart.title, left_area)
        .build_cartesian_2d(-0.5..extent, -0.5..extent)?;

    let columns = &chart.columns;
    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(n.max(1))
        .y_labels(n.max(1))
        .x_label_formatter(&|v| cell_label(columns, *v, false))
        .y_label_formatter(&|v| cell_label(columns, *v, true))
        .label_style(theme.font(1.0))
        .axis_style(theme.foreground)
        .bold_line_style(theme.foreground)
        .draw()?;

    if n == 0 {
        return draw_note(&ctx, "no numeric columns", theme);
    }

    let cells: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .map(|(i, j)| (i, j, chart.get(i, j).unwrap_or(f64::NAN)))
        .collect();

    // Row 0 is drawn at the top.
    let row_y = |i: usize| (n - 1 - i) as f64;

    ctx.draw_series(cells.iter().map(|&(i, j, v)| {
        let (r, g, b) = coolwarm(v);
        let (x, y) = (j as f64, row_y(i));
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], RGBColor(r, g, b).filled())
    }))?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    ctx.draw_series(cells.iter().map(|&(i, j, v)| {
        let ink = if v.is_finite() && v.abs() > 0.6 { WHITE } else { BLACK };
        let style = FontDesc::new(FontFamily::SansSerif, theme.font_size, FontStyle::Normal)
            .color(&ink)
            .pos(centered);
        Text::new(fmt_corr(v), (j as f64, row_y(i)), style)
    }))?;

    Ok(())
}

/// Diverging blue-white-red scale over `[-1, 1]` (grey for undefined values).
pub fn coolwarm(v: f64) -> (u8, u8, u8) {
    const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    if !v.is_finite() {
        return (160, 160, 160);
    }
    let v = v.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 { (MID, COLD, -v) } else { (MID, WARM, v) };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

fn cell_label(columns: &[String], v: f64, vertical: bool) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    let idx = idx as usize;
    let n = columns.len();
    if idx >= n {
        return String::new();
    }
    let idx = if vertical { n - 1 - idx } else { idx };
    columns[idx].clone()
}

fn draw_markers<DB: DrawingBackend>(ctx: &mut Ctx2d<'_, DB>, points: &[(f64, f64)], theme: &Theme) -> DrawResult<DB> {
    match theme.marker {
        Marker::Pixel => {
            ctx.draw_series(points.iter().map(|&p| Pixel::new(p, theme.point)))?;
        }
        Marker::Circle(radius) => {
            ctx.draw_series(points.iter().map(|&p| Circle::new(p, radius, theme.point.mix(0.8).filled())))?;
        }
    }
    Ok(())
}

fn draw_note<DB: DrawingBackend>(ctx: &Ctx2d<'_, DB>, note: &str, theme: &Theme) -> DrawResult<DB> {
    let (x, y) = (ctx.x_range(), ctx.y_range());
    let center = ((x.start + x.end) / 2.0, (y.start + y.end) / 2.0);
    let style = theme.font(1.0).pos(Pos::new(HPos::Center, VPos::Center));
    ctx.plotting_area().draw(&Text::new(note.to_string(), center, style))
}

fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return (lo - 0.5, lo + 0.5);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

fn padded_or_unit(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo.is_finite() && hi.is_finite() {
        padded(lo, hi)
    } else {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), (59, 76, 192));
        assert_eq!(coolwarm(0.0), (221, 221, 221));
        assert_eq!(coolwarm(1.0), (180, 4, 38));
        assert_eq!(coolwarm(f64::NAN), (160, 160, 160));
        assert_eq!(coolwarm(7.0), coolwarm(1.0));
    }

    #[test]
    fn heatmap_labels_land_on_cell_centres() {
        let cols = vec!["VALUE".to_string(), "ACTUAL".to_string(), "PDF".to_string()];
        assert_eq!(cell_label(&cols, 0.0, false), "VALUE");
        assert_eq!(cell_label(&cols, 2.0, false), "PDF");
        assert_eq!(cell_label(&cols, 0.5, false), "");
        assert_eq!(cell_label(&cols, 3.0, false), "");
        // Vertical axis counts from the bottom.
        assert_eq!(cell_label(&cols, 0.0, true), "PDF");
        assert_eq!(cell_label(&cols, 2.0, true), "VALUE");
    }

    #[test]
    fn padding_handles_degenerate_ranges() {
        assert_eq!(padded(1.0, 1.0), (0.5, 1.5));
        let (lo, hi) = padded(0.0, 10.0);
        assert!((lo + 0.5).abs() < 1e-12 && (hi - 10.5).abs() < 1e-12);
        assert_eq!(padded_or_unit(std::iter::empty()), (0.0, 1.0));
    }
}
