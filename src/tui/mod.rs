//! Ratatui-based terminal UI.
//!
//! A selector panel (view, indicators, year, countries, region) drives one of
//! four views: ranked map, trend lines, correlation scatter, or pictogram
//! comparison. Data is loaded once before the terminal is taken over.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};
use tracing::debug;

use crate::app::pipeline::{self, LoadedData};
use crate::domain::{DashConfig, IndicatorKind, Region};
use crate::error::AppError;
use crate::views::{CorrelationView, Dashboard, TrendView};

mod plotters_chart;

use plotters_chart::{IndicatorChart, LINE_PALETTE};

/// Load the data directory, then start the TUI.
pub fn run(config: DashConfig) -> Result<(), AppError> {
    let loaded = pipeline::load(&config)?;
    if loaded.dashboard.kinds().next().is_none() {
        return Err(AppError::new(
            3,
            format!(
                "No known indicator export found in '{}'. Run `eudash summary` for details.",
                config.data_dir.display()
            ),
        ));
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(loaded);
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
enum ViewMode {
    Map,
    Trend,
    Correlation,
    Compare,
}

impl ViewMode {
    const ALL: [ViewMode; 4] = [ViewMode::Map, ViewMode::Trend, ViewMode::Correlation, ViewMode::Compare];

    fn name(self) -> &'static str {
        match self {
            ViewMode::Map => "Map",
            ViewMode::Trend => "Trend",
            ViewMode::Correlation => "Correlation",
            ViewMode::Compare => "Compare",
        }
    }

    fn step(self, delta: i32) -> Self {
        let idx = Self::ALL.iter().position(|&v| v == self).unwrap_or(0);
        Self::ALL[cycle(idx, Self::ALL.len(), delta)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    View,
    Indicator,
    IndicatorY,
    Year,
    Country,
    CountryB,
    Region,
}

const FIELDS: [Field; 7] = [
    Field::View,
    Field::Indicator,
    Field::IndicatorY,
    Field::Year,
    Field::Country,
    Field::CountryB,
    Field::Region,
];

struct App {
    loaded: LoadedData,
    /// Loaded indicators only; selectors never offer a missing table.
    kinds: Vec<IndicatorKind>,
    view: ViewMode,
    x: IndicatorKind,
    y: IndicatorKind,
    /// `None` follows the latest available year.
    year: Option<i32>,
    country: usize,
    country_b: usize,
    region: Option<Region>,
    selected_field: usize,
    status: String,
}

impl App {
    fn new(loaded: LoadedData) -> Self {
        let kinds: Vec<IndicatorKind> = loaded.dashboard.kinds().collect();
        let x = kinds.first().copied().unwrap_or(IndicatorKind::EmploymentRate);
        let y = kinds.get(1).copied().unwrap_or(x);
        let status = format!(
            "{} table(s) loaded, {} skipped",
            loaded.tables.len(),
            loaded.report.skipped.len()
        );
        Self {
            loaded,
            kinds,
            view: ViewMode::Map,
            x,
            y,
            year: None,
            country: 0,
            country_b: 1,
            region: None,
            selected_field: 0,
            status,
        }
    }

    fn dashboard(&self) -> &Dashboard {
        &self.loaded.dashboard
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
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
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

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELDS.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Tab => self.adjust_view(1),
            KeyCode::Char('l') => {
                self.year = None;
                self.status = "year: latest".to_string();
            }
            _ => {}
        }
        false
    }

    fn adjust_view(&mut self, delta: i32) {
        self.view = self.view.step(delta);
        self.status = format!("view: {}", self.view.name());
    }

    fn adjust_field(&mut self, delta: i32) {
        match FIELDS[self.selected_field] {
            Field::View => self.adjust_view(delta),
            Field::Indicator => {
                self.x = self.step_kind(self.x, delta);
                self.status = format!("indicator: {}", self.x.title());
            }
            Field::IndicatorY => {
                self.y = self.step_kind(self.y, delta);
                self.status = format!("indicator Y: {}", self.y.title());
            }
            Field::Year => {
                let years = self.years();
                if years.is_empty() {
                    self.status = "no years available".to_string();
                    return;
                }
                let current = self.resolved_year(&years);
                let idx = current
                    .and_then(|y| years.iter().position(|&v| v == y))
                    .unwrap_or(years.len() - 1);
                let next = years[cycle(idx, years.len(), delta)];
                self.year = Some(next);
                self.status = format!("year: {next}");
            }
            Field::Country => {
                let n = self.countries().len();
                if n > 0 {
                    self.country = cycle(self.country.min(n - 1), n, delta);
                }
            }
            Field::CountryB => {
                let n = self.countries().len();
                if n > 0 {
                    self.country_b = cycle(self.country_b.min(n - 1), n, delta);
                }
            }
            Field::Region => {
                self.region = step_region(self.region, delta);
                self.status = format!(
                    "region: {}",
                    self.region.map(|r| r.display_name()).unwrap_or("none")
                );
            }
        }
        debug!(field = ?FIELDS[self.selected_field], "selector changed");
    }

    fn step_kind(&self, current: IndicatorKind, delta: i32) -> IndicatorKind {
        if self.kinds.is_empty() {
            return current;
        }
        let idx = self.kinds.iter().position(|&k| k == current).unwrap_or(0);
        self.kinds[cycle(idx, self.kinds.len(), delta)]
    }

    /// Years selectable in the current view.
    fn years(&self) -> Vec<i32> {
        match self.view {
            ViewMode::Correlation => self.dashboard().common_years(&[self.x, self.y]),
            _ => self.dashboard().union_years(&[self.x]),
        }
    }

    /// The chosen year if it is still valid, else the latest one.
    fn resolved_year(&self, years: &[i32]) -> Option<i32> {
        match self.year {
            Some(y) if years.contains(&y) => Some(y),
            _ => years.last().copied(),
        }
    }

    fn countries(&self) -> Vec<String> {
        self.dashboard().countries(&[self.x])
    }

    fn country_at(&self, countries: &[String], idx: usize) -> Option<String> {
        if countries.is_empty() {
            return None;
        }
        countries.get(idx.min(countries.len() - 1)).cloned()
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("eudash", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {} view", self.view.name())),
        ]));

        let years = self.years();
        let year = self
            .resolved_year(&years)
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!(
                "{} ({}) | year: {year} | {} indicator(s) loaded",
                self.x.title(),
                self.x.unit(),
                self.kinds.len()
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(44)])
            .split(area);

        self.draw_view(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_view(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.view.name()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let years = self.years();
        let countries = self.countries();
        let result = match self.view {
            ViewMode::Map => self.draw_map(frame, inner, &years),
            ViewMode::Trend => self.draw_trend(frame, inner, &countries),
            ViewMode::Correlation => self.draw_correlation(frame, inner, &years),
            ViewMode::Compare => self.draw_compare(frame, inner, &years, &countries),
        };

        if let Err(err) = result {
            let msg = Paragraph::new(err.to_string())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
        }
    }

    fn draw_map(&self, frame: &mut ratatui::Frame<'_>, area: Rect, years: &[i32]) -> Result<(), AppError> {
        let year = pipeline::resolve_year(self.resolved_year(years), years)?;
        let view = self.dashboard().map(self.x, year)?;
        let text = crate::report::format_map(&view, Some(area.height as usize));
        frame.render_widget(Paragraph::new(text), area);
        Ok(())
    }

    fn draw_trend(&self, frame: &mut ratatui::Frame<'_>, area: Rect, countries: &[String]) -> Result<(), AppError> {
        let mut selected: Vec<String> = Vec::new();
        if let Some(c) = self.country_at(countries, self.country) {
            selected.push(c);
        }
        if let Some(region) = self.region {
            for &member in region.countries() {
                if !selected.iter().any(|c| c == member) {
                    selected.push(member.to_string());
                }
            }
        }
        let view = self.dashboard().trend(self.x, &selected)?;
        let (lines, x_bounds, y_bounds) = trend_series(&view);

        let (chart_rect, insets) = chart_layout(area);
        let widget = IndicatorChart {
            lines: &lines,
            points: &[],
            highlighted: &[],
            fit_line: &[],
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: self.x.unit(),
            fmt_x: fmt_axis_year,
            fmt_y: fmt_axis_value,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, area, chart_rect, insets, x_bounds, y_bounds, "year", self.x.unit());
        }

        // Legend in series color order, along the top edge.
        let legend: Vec<Span> = view
            .series
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                let c = LINE_PALETTE[idx % LINE_PALETTE.len()];
                Span::styled(format!("■ {}  ", s.country), Style::default().fg(Color::Rgb(c.0, c.1, c.2)))
            })
            .collect();
        let legend_rect = Rect {
            x: chart_rect.x,
            y: area.y,
            width: chart_rect.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(legend)), legend_rect);
        Ok(())
    }

    fn draw_correlation(&self, frame: &mut ratatui::Frame<'_>, area: Rect, years: &[i32]) -> Result<(), AppError> {
        let year = pipeline::resolve_year(self.resolved_year(years), years)?;
        let view = self.dashboard().correlation(self.x, self.y, year, self.region)?;
        let series = scatter_series(&view);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let summary = match view.fit {
            Some(fit) => format!(
                "{} vs {} ({year}) | y = {:.3} + {:.3}x | R²={:.3} | n={}",
                self.y.title(),
                self.x.title(),
                fit.intercept,
                fit.slope,
                fit.r_squared,
                fit.n
            ),
            None => format!("{} vs {} ({year}) | no fit (n={})", self.y.title(), self.x.title(), view.points.len()),
        };
        frame.render_widget(
            Paragraph::new(summary).style(Style::default().fg(Color::Gray)),
            chunks[0],
        );

        let (chart_rect, insets) = chart_layout(chunks[1]);
        let widget = IndicatorChart {
            lines: &[],
            points: &series.points,
            highlighted: &series.highlighted,
            fit_line: &series.fit_line,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: self.x.unit(),
            y_label: self.y.unit(),
            fmt_x: fmt_axis_value,
            fmt_y: fmt_axis_value,
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(
                frame,
                chunks[1],
                chart_rect,
                insets,
                series.x_bounds,
                series.y_bounds,
                self.x.unit(),
                self.y.unit(),
            );
        }
        Ok(())
    }

    fn draw_compare(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        years: &[i32],
        countries: &[String],
    ) -> Result<(), AppError> {
        let year = pipeline::resolve_year(self.resolved_year(years), years)?;
        let (Some(a), Some(b)) = (
            self.country_at(countries, self.country),
            self.country_at(countries, self.country_b),
        ) else {
            return Err(AppError::new(3, "No countries to compare."));
        };
        let view = self.dashboard().compare(self.x, year, &a, &b)?;
        let text = crate::report::format_comparison(&view);
        frame.render_widget(Paragraph::new(text), area);
        Ok(())
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let years = self.years();
        let countries = self.countries();
        let year = self
            .resolved_year(&years)
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());
        let country = self.country_at(&countries, self.country).unwrap_or_else(|| "-".to_string());
        let country_b = self
            .country_at(&countries, self.country_b)
            .unwrap_or_else(|| "-".to_string());

        let items: Vec<ListItem> = FIELDS
            .iter()
            .map(|field| {
                let text = match field {
                    Field::View => format!("View: {}", self.view.name()),
                    Field::Indicator => format!("Indicator: {}", short_title(self.x)),
                    Field::IndicatorY => format!("Indicator Y: {}", short_title(self.y)),
                    Field::Year => format!("Year: {year}"),
                    Field::Country => format!("Country: {country}"),
                    Field::CountryB => format!("Compare with: {country_b}"),
                    Field::Region => format!(
                        "Region: {}",
                        self.region.map(|r| r.display_name()).unwrap_or("none")
                    ),
                };
                ListItem::new(text)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Tab view  l latest year  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn cycle(idx: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (((idx as i64 + delta as i64) % len + len) % len) as usize
}

/// `None` -> every region -> `None`.
fn step_region(current: Option<Region>, delta: i32) -> Option<Region> {
    let mut options = vec![None];
    options.extend(Region::ALL.into_iter().map(Some));
    let idx = options.iter().position(|&r| r == current).unwrap_or(0);
    options[cycle(idx, options.len(), delta)]
}

fn short_title(kind: IndicatorKind) -> String {
    crate::report::truncate(kind.title(), 28)
}

/// Polylines and bounds for a trend chart.
fn trend_series(view: &TrendView) -> (Vec<Vec<(f64, f64)>>, [f64; 2], [f64; 2]) {
    let lines: Vec<Vec<(f64, f64)>> = view
        .series
        .iter()
        .map(|s| s.points.iter().map(|&(y, v)| (y as f64, v)).collect())
        .collect();

    let (mut x0, mut x1) = view
        .year_range()
        .map(|(a, b)| (a as f64, b as f64))
        .unwrap_or((0.0, 1.0));
    if x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }

    let y_bounds = padded_bounds(lines.iter().flatten().map(|p| p.1));
    (lines, [x0, x1], y_bounds)
}

struct ScatterSeries {
    points: Vec<(f64, f64)>,
    highlighted: Vec<(f64, f64)>,
    fit_line: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn scatter_series(view: &CorrelationView) -> ScatterSeries {
    let (points, highlighted): (Vec<_>, Vec<_>) = view.points.iter().partition(|p| !p.highlighted);
    let points: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let highlighted: Vec<(f64, f64)> = highlighted.iter().map(|p| (p.x, p.y)).collect();

    let x_bounds = padded_bounds(view.points.iter().map(|p| p.x));
    let fit_line = view
        .fit
        .map(|fit| vec![(x_bounds[0], fit.predict(x_bounds[0])), (x_bounds[1], fit.predict(x_bounds[1]))])
        .unwrap_or_default();
    let y_bounds = padded_bounds(view.points.iter().map(|p| p.y).chain(fit_line.iter().map(|p| p.1)));

    ScatterSeries {
        points,
        highlighted,
        fit_line,
        x_bounds,
        y_bounds,
    }
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if hi <= lo {
        return [lo - 1.0, hi + 1.0];
    }
    let (lo, hi) = crate::plot::pad_range(lo, hi, 0.05);
    [lo, hi]
}

fn fmt_axis_year(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_value(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

#[allow(clippy::too_many_arguments)]
fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_desc: &str,
    y_desc: &str,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{:.0}", x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{:.0}", y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(x_desc.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(y_desc.to_string())
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExclusionSet, LoadReport};
    use crate::views::fixture;

    fn app() -> App {
        let tables = fixture::table_set();
        let dashboard = Dashboard::new(&tables, &ExclusionSet::default());
        App::new(LoadedData {
            tables,
            report: LoadReport::default(),
            dashboard,
        })
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(0, 4, -1), 3);
        assert_eq!(cycle(3, 4, 1), 0);
        assert_eq!(cycle(1, 4, 1), 2);
        assert_eq!(cycle(0, 0, 1), 0);
    }

    #[test]
    fn region_selector_includes_none() {
        assert_eq!(step_region(None, 1), Some(Region::Nordics));
        assert_eq!(step_region(None, -1), Some(Region::EasternEurope));
        assert_eq!(step_region(Some(Region::EasternEurope), 1), None);
    }

    #[test]
    fn indicator_selector_only_offers_loaded_tables() {
        let mut app = app();
        assert_eq!(app.kinds.len(), 3);
        let start = app.x;
        app.selected_field = 1;
        for _ in 0..3 {
            app.handle_key(KeyCode::Right);
            assert!(app.dashboard().available(app.x));
        }
        assert_eq!(app.x, start);
    }

    #[test]
    fn year_follows_latest_until_chosen() {
        let mut app = app();
        app.x = IndicatorKind::EmploymentRate;
        let years = app.years();
        assert_eq!(years, vec![2019, 2020, 2021]);
        assert_eq!(app.resolved_year(&years), Some(2021));

        app.selected_field = 3;
        app.handle_key(KeyCode::Left);
        assert_eq!(app.year, Some(2020));

        // Switching to correlation narrows to shared years; 2020 is still valid.
        app.y = IndicatorKind::LongTermUnemployment;
        app.view = ViewMode::Correlation;
        assert_eq!(app.resolved_year(&app.years()), Some(2020));

        app.handle_key(KeyCode::Char('l'));
        assert_eq!(app.year, None);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn scatter_series_splits_highlighted_points() {
        let dash = fixture::dashboard();
        let view = dash
            .correlation(
                IndicatorKind::EmploymentRate,
                IndicatorKind::LongTermUnemployment,
                2020,
                Some(Region::Nordics),
            )
            .unwrap();
        let s = scatter_series(&view);
        assert_eq!(s.points.len(), 1);
        assert_eq!(s.highlighted.len(), 2);
        assert_eq!(s.fit_line.len(), 2);
        assert!(s.x_bounds[0] < 58.3 && s.x_bounds[1] > 80.8);
    }
}
