//! Plotters-powered indicator chart widget for Ratatui.
//!
//! Plotters gives axis and label rendering for free; its output is drawn into
//! the Ratatui buffer through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Line colors cycled across trend series, matching the legend order.
pub const LINE_PALETTE: [RGBColor; 6] = [
    RGBColor(0, 255, 255),
    RGBColor(255, 255, 0),
    RGBColor(255, 0, 255),
    RGBColor(0, 255, 0),
    RGBColor(255, 128, 0),
    RGBColor(128, 128, 255),
];

/// A render-only chart description.
///
/// All series and bounds are computed before rendering.
pub struct IndicatorChart<'a> {
    /// One polyline per trend series.
    pub lines: &'a [Vec<(f64, f64)>],
    /// Scatter points outside the highlighted region.
    pub points: &'a [(f64, f64)],
    /// Scatter points inside the highlighted region.
    pub highlighted: &'a [(f64, f64)],
    /// Regression line endpoints, empty when no fit.
    pub fit_line: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for IndicatorChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters fails to lay out very small areas.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (idx, line) in self.lines.iter().enumerate() {
                let color = LINE_PALETTE[idx % LINE_PALETTE.len()];
                chart.draw_series(LineSeries::new(line.iter().copied(), &color))?;
            }

            if self.fit_line.len() >= 2 {
                chart.draw_series(LineSeries::new(self.fit_line.iter().copied(), &RGBColor(0, 255, 255)))?;
            }

            // `Pixel` rather than `Circle`: the backend maps circle radii to
            // canvas units incorrectly and draws huge circles.
            chart.draw_series(self.points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
            chart.draw_series(
                self.highlighted
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), RGBColor(0, 255, 0))),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
