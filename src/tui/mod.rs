//! Ratatui-based terminal dashboard.
//!
//! One page per dashboard section. The FPI selector sits in the header and
//! every change rebuilds the dashboard from the already loaded table. All
//! charts, the heatmap included, are drawn through Plotters.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};

use crate::app::pipeline::Session;
use crate::error::AppError;
use crate::report::narrative;

mod plotters_chart;

use plotters_chart::DashboardChart;

/// Start the TUI on an already loaded session.
pub fn run(session: Session) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Introduction,
    Distributions,
    BoxPlots,
    Scatter,
    Correlation,
    Insights,
    Recommendations,
}

const PAGES: [Page; 7] = [
    Page::Introduction,
    Page::Distributions,
    Page::BoxPlots,
    Page::Scatter,
    Page::Correlation,
    Page::Insights,
    Page::Recommendations,
];

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Introduction => "Introduction",
            Page::Distributions => "Distributions",
            Page::BoxPlots => "Box plots",
            Page::Scatter => "Scatter",
            Page::Correlation => "Correlation",
            Page::Insights => "Insights",
            Page::Recommendations => "Recommendations",
        }
    }
}

struct App {
    session: Session,
    page: usize,
    status: String,
}

impl App {
    fn new(mut session: Session) -> Self {
        let status = if session.is_in_sync() {
            format!("Loaded {} rows", session.table.len())
        } else {
            // The selector only offers codes present in the data.
            let requested = session.dashboard.fpi.clone();
            session.on_selection_change();
            format!(
                "FPI {requested} not found in data; showing {}",
                session.dashboard.fpi
            )
        };

        Self {
            session,
            page: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => {
                if self.session.selector.prev() {
                    self.on_selection_change();
                }
            }
            KeyCode::Right => {
                if self.session.selector.next() {
                    self.on_selection_change();
                }
            }
            KeyCode::Tab => self.page = (self.page + 1) % PAGES.len(),
            KeyCode::BackTab => self.page = (self.page + PAGES.len() - 1) % PAGES.len(),
            KeyCode::Char(c @ '1'..='7') => {
                self.page = c as usize - '1' as usize;
            }
            _ => {}
        }
        false
    }

    fn on_selection_change(&mut self) {
        self.session.on_selection_change();
        let dash = &self.session.dashboard;
        debug!("selected FPI {} ({} rows)", dash.fpi, dash.row_count);
        self.status = format!("FPI {} selected ({} rows)", dash.fpi, dash.row_count);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1)])
            .split(inner);

        let selector = &self.session.selector;
        let dash = &self.session.dashboard;
        let position = if selector.is_empty() {
            "-".to_string()
        } else {
            format!("{}/{}", selector.selected_index() + 1, selector.options().len())
        };

        let lines = vec![
            Line::from(Span::styled(
                self.session.config.title.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw("Select Forecast Period (FPI): "),
                Span::styled(format!("◀ {} ▶", dash.fpi), Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(" ({position}) | rows: {}", dash.row_count),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(Text::from(lines)), rows[0]);

        let titles: Vec<String> = PAGES
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {}", i + 1, p.title()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.page)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .divider("|");
        frame.render_widget(tabs, rows[1]);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let dash = &self.session.dashboard;
        match PAGES[self.page] {
            Page::Introduction => self.draw_introduction(frame, area),
            Page::Distributions => {
                let panes = split_pair(frame, area, &dash.univariate_heading());
                for (chart, pane) in dash.distributions.iter().zip(panes) {
                    draw_chart(frame, pane, &chart.title, DashboardChart::Distribution(chart));
                }
            }
            Page::BoxPlots => {
                let panes = split_pair(frame, area, &dash.univariate_heading());
                for (chart, pane) in dash.boxplots.iter().zip(panes) {
                    draw_chart(frame, pane, &chart.title, DashboardChart::BoxPlot(chart));
                }
            }
            Page::Scatter => {
                let block = Block::default().title(dash.bivariate_heading()).borders(Borders::ALL);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                draw_chart(frame, inner, &dash.scatter.title, DashboardChart::Scatter(&dash.scatter));
            }
            Page::Correlation => {
                let block = Block::default().title(dash.multivariate_heading()).borders(Borders::ALL);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                draw_chart(
                    frame,
                    inner,
                    &dash.correlation.title,
                    DashboardChart::Heatmap(&dash.correlation),
                );
            }
            Page::Insights => {
                let mut lines = vec![Line::from(narrative::INSIGHTS_LEAD), Line::from("")];
                lines.extend(narrative::INSIGHTS.iter().map(|item| Line::from(format!("• {item}"))));
                draw_text_page(frame, area, narrative::INSIGHTS_HEADING, lines);
            }
            Page::Recommendations => {
                let mut lines = Vec::new();
                for (head, detail) in narrative::RECOMMENDATIONS {
                    lines.push(Line::from(Span::styled(head, Style::default().add_modifier(Modifier::BOLD))));
                    lines.push(Line::from(detail));
                    lines.push(Line::from(""));
                }
                draw_text_page(frame, area, narrative::RECOMMENDATIONS_HEADING, lines);
            }
        }
    }

    fn draw_introduction(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let table = &self.session.table;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let columns = table.correlation_columns().join(", ");

        let lines = vec![
            Line::from(narrative::INTRODUCTION),
            Line::from(""),
            Line::from(Span::styled(narrative::EXPLORATION_HEADING, bold)),
            Line::from(narrative::EXPLORATION),
            Line::from(""),
            Line::from(format!(
                "Dataset: {} ({} rows)",
                self.session.config.data_path.display(),
                table.len()
            )),
            Line::from(format!("Forecast periods: {}", self.session.selector.options().join(", "))),
            Line::from(format!("Numeric columns: {columns}")),
        ];
        draw_text_page(frame, area, narrative::INTRODUCTION_HEADING, lines);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ FPI  Tab/Shift-Tab page  1-7 jump  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Outer block titled `heading`, split into two side-by-side panes.
fn split_pair(frame: &mut ratatui::Frame<'_>, area: Rect, heading: &str) -> [Rect; 2] {
    let block = Block::default().title(heading.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    [halves[0], halves[1]]
}

fn draw_chart(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, chart: DashboardChart<'_>) {
    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);
    frame.render_widget(chart, inner);
}

fn draw_text_page(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DashboardConfig;

    const DATA: &str = "ESTIMATOR,ANALYS,FPI,VALUE,ACTUAL,ACTDATS,ANNDATS,REVDATS,FPEDATS,ANNDATS_ACT\n\
        1,10,6,1.5,1.6,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        2,20,6,2.0,1.9,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n\
        3,30,1,0.5,0.4,2019-01-02,2019-01-03,2019-01-04,2019-09-30,2019-10-30\n";

    fn app(fpi: Option<&str>) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, DATA).unwrap();
        let session = Session::open(DashboardConfig {
            data_path: path,
            title: "T".to_string(),
            fpi: fpi.map(str::to_string),
        })
        .unwrap();
        (dir, App::new(session))
    }

    #[test]
    fn arrows_rebuild_for_the_new_period() {
        let (_dir, mut app) = app(None);
        assert_eq!(app.session.dashboard.fpi, "6");

        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.session.dashboard.fpi, "1");
        assert_eq!(app.session.dashboard.row_count, 1);

        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.session.dashboard.fpi, "6");
        assert!(app.status.contains("2 rows"));
    }

    #[test]
    fn page_keys_wrap_and_jump() {
        let (_dir, mut app) = app(None);
        app.handle_key(KeyCode::BackTab);
        assert_eq!(PAGES[app.page], Page::Recommendations);
        app.handle_key(KeyCode::Tab);
        assert_eq!(PAGES[app.page], Page::Introduction);
        app.handle_key(KeyCode::Char('5'));
        assert_eq!(PAGES[app.page], Page::Correlation);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn correlation_page_draws_the_heatmap() {
        let (_dir, mut app) = app(None);
        app.handle_key(KeyCode::Char('5'));

        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Multivariate Analysis"));
        assert!(screen.contains("Correlation Heatmap of Numerical Variables"));
        assert!(!screen.contains("Chart area too small"));
    }

    #[test]
    fn unknown_period_falls_back_to_default() {
        let (_dir, app) = app(Some("9"));
        assert_eq!(app.session.dashboard.fpi, "6");
        assert!(app.status.contains("FPI 9 not found"));
    }
}
