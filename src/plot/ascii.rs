//! ASCII/Unicode plotting for terminal output.
//!
//! Fixed-size grids with deterministic output, so the CLI can print trends and
//! scatters without a terminal UI and tests can compare exact strings.
//!
//! Plot elements:
//! - trend series: one marker per country, joined by `.`
//! - scatter points: `o`, or `*` when inside the highlighted region
//! - regression line: `-`

use crate::views::{CorrelationView, TrendView};

/// Markers cycled across trend series; the legend maps them back to countries.
pub const SERIES_MARKERS: [char; 8] = ['o', 'x', '+', '#', '@', '%', '&', '$'];

/// Render year-by-year lines for every series in the view.
pub fn render_trend(view: &TrendView, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = view
        .year_range()
        .map(|(a, b)| widen(a as f64, b as f64))
        .unwrap_or((0.0, 1.0));
    let values = view.series.iter().flat_map(|s| s.points.iter().map(|p| p.1));
    let (y_min, y_max) = value_range(values).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Connectors first so markers overlay them.
    for series in &view.series {
        let cells: Vec<(usize, usize)> = series
            .points
            .iter()
            .map(|&(year, v)| {
                (
                    map_x(year as f64, x_min, x_max, width),
                    map_y(v, y_min, y_max, height),
                )
            })
            .collect();
        for pair in cells.windows(2) {
            draw_line(&mut grid, pair[0].0, pair[0].1, pair[1].0, pair[1].1, '.');
        }
    }
    for (idx, series) in view.series.iter().enumerate() {
        let marker = SERIES_MARKERS[idx % SERIES_MARKERS.len()];
        for &(year, v) in &series.points {
            let x = map_x(year as f64, x_min, x_max, width);
            let y = map_y(v, y_min, y_max, height);
            grid[y][x] = marker;
        }
    }

    let mut out = format!(
        "Plot: years=[{}, {}] | {}=[{y_min:.2}, {y_max:.2}]\n",
        x_min.round(),
        x_max.round(),
        view.kind.unit()
    );
    push_grid(&mut out, grid);

    let legend: Vec<String> = view
        .series
        .iter()
        .enumerate()
        .map(|(idx, s)| format!("{} {}", SERIES_MARKERS[idx % SERIES_MARKERS.len()], s.country))
        .collect();
    out.push_str(&legend.join("  "));
    out.push('\n');
    out
}

/// Render the scatter with its regression line, if one was fitted.
pub fn render_scatter(view: &CorrelationView, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = value_range(view.points.iter().map(|p| p.x)).unwrap_or((0.0, 1.0));
    let line = view
        .fit
        .map(|fit| [(x_min, fit.predict(x_min)), (x_max, fit.predict(x_max))]);

    let ys = view
        .points
        .iter()
        .map(|p| p.y)
        .chain(line.iter().flat_map(|l| l.iter().map(|p| p.1)));
    let (y_min, y_max) = value_range(ys).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    if let Some([(x0, y0), (x1, y1)]) = line {
        draw_line(
            &mut grid,
            map_x(x0, x_min, x_max, width),
            map_y(y0, y_min, y_max, height),
            map_x(x1, x_min, x_max, width),
            map_y(y1, y_min, y_max, height),
            '-',
        );
    }

    for p in &view.points {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.y, y_min, y_max, height);
        grid[y][x] = if p.highlighted { '*' } else { 'o' };
    }

    let mut out = format!("Plot: x=[{x_min:.2}, {x_max:.2}] | y=[{y_min:.2}, {y_max:.2}]\n");
    push_grid(&mut out, grid);
    out
}

fn push_grid(out: &mut String, grid: Vec<Vec<char>>) {
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
}

/// Min/max of finite values; a single distinct value is widened by one unit.
fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some(widen(min, max))
    } else {
        None
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min { (min, max) } else { (min - 1.0, max + 1.0) }
}

/// Widen `[min, max]` by `frac` of its span on both sides.
pub fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
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

/// Integer line drawing (Bresenham-ish). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IndicatorKind;
    use crate::math::fit_line;
    use crate::views::{ScatterPoint, TrendSeries};

    fn point(country: &str, x: f64, y: f64, highlighted: bool) -> ScatterPoint {
        ScatterPoint {
            country: country.to_string(),
            code: None,
            x,
            y,
            highlighted,
        }
    }

    #[test]
    fn scatter_golden_snapshot_small() {
        let points = vec![
            point("A", 0.0, 0.0, false),
            point("B", 5.0, 5.0, false),
            point("C", 10.0, 10.0, true),
        ];
        let fit = fit_line(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        let view = CorrelationView {
            x_kind: IndicatorKind::TertiaryEducation,
            y_kind: IndicatorKind::RealGdp,
            year: 2020,
            region: None,
            points,
            fit,
        };

        let txt = render_scatter(&view, 11, 5);
        let expected = concat!(
            "Plot: x=[0.00, 10.00] | y=[-0.50, 10.50]\n",
            "         -*\n",
            "       --  \n",
            "    -o-    \n",
            "  --       \n",
            "o-         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn scatter_without_fit_draws_points_only() {
        let view = CorrelationView {
            x_kind: IndicatorKind::TertiaryEducation,
            y_kind: IndicatorKind::RealGdp,
            year: 2020,
            region: None,
            points: vec![point("A", 1.0, 2.0, false), point("B", 3.0, 1.0, false)],
            fit: None,
        };
        let txt = render_scatter(&view, 20, 6);
        let grid: String = txt.lines().skip(1).collect();
        assert!(!grid.contains('-'));
        assert_eq!(grid.matches('o').count(), 2);
    }

    #[test]
    fn trend_draws_markers_and_legend() {
        let view = TrendView {
            kind: IndicatorKind::EmploymentRate,
            series: vec![
                TrendSeries {
                    country: "Finland".to_string(),
                    points: vec![(2015, 70.0), (2020, 76.0)],
                },
                TrendSeries {
                    country: "Greece".to_string(),
                    points: vec![(2015, 50.0), (2020, 58.0)],
                },
            ],
        };
        let txt = render_trend(&view, 30, 8);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines.len(), 1 + 8 + 1);
        assert!(lines[0].starts_with("Plot: years=[2015, 2020]"));
        // Highest value sits top-right, lowest bottom-left.
        assert_eq!(lines[1].chars().last(), Some('o'));
        assert_eq!(lines[8].chars().next(), Some('x'));
        assert_eq!(lines[9], "o Finland  x Greece");
    }

    #[test]
    fn flat_single_point_trend_does_not_panic() {
        let view = TrendView {
            kind: IndicatorKind::Neet,
            series: vec![TrendSeries {
                country: "Malta".to_string(),
                points: vec![(2021, 9.5)],
            }],
        };
        let txt = render_trend(&view, 10, 5);
        let grid: String = txt.lines().skip(1).take(5).collect();
        assert_eq!(grid.matches('o').count(), 1);
    }
}
