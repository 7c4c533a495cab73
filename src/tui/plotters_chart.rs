//! Plotters-powered bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// `ratatui::style::Color` below shadows the prelude's trait of the same name.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only bar chart description.
///
/// All series and bounds are computed outside the render call so `render()`
/// stays focused on drawing.
pub struct BarPlottersChart<'a> {
    /// One bar per entry, oldest first.
    pub values: &'a [i64],
    /// X tick labels, parallel to `values`.
    pub labels: &'a [String],
    /// Upper y bound (the lower bound is always zero).
    pub y_max: f64,
    pub bar_color: (u8, u8, u8),
}

impl<'a> Widget for BarPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.values.len();
        if n == 0 || !(self.y_max.is_finite() && self.y_max > 0.0) {
            return;
        }

        let x0 = -0.5_f64;
        let x1 = n as f64 - 0.5;
        let y1 = self.y_max;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, 0.0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(4)
                .y_labels(4)
                .x_label_formatter(&|v| label_at(self.labels, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            let (r, g, b) = self.bar_color;
            let fill = RGBColor(r, g, b).filled();

            chart.draw_series(self.values.iter().enumerate().map(|(i, &v)| {
                let x = i as f64;
                Rectangle::new([(x - 0.4, 0.0), (x + 0.4, v.max(0) as f64)], fill)
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Tick label for a fractional x position (nearest bar).
fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}
