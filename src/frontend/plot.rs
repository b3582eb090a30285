//! Plot rendering module using egui_plot
//!
//! Two fixed plots: the trend scatter (readings against their index, with
//! time-of-day labels on the x axis and the fitted line on top) and the
//! location plot (a single marker on a longitude/latitude grid).

use crate::frontend::views::{ChartView, LocationView, REGRESSION_LEGEND};
use egui::{Color32, Ui};
use egui_plot::{Corner, GridMark, Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

/// Trend plot configuration
#[derive(Debug, Clone)]
pub struct TrendPlot {
    pub height: f32,
    pub point_radius: f32,
    pub line_width: f32,
    pub point_color: Color32,
    pub trend_color: Color32,
}

impl Default for TrendPlot {
    fn default() -> Self {
        Self {
            height: 260.0,
            point_radius: 5.0,
            line_width: 2.0,
            point_color: Color32::from_rgb(100, 149, 237),
            trend_color: Color32::from_rgb(255, 140, 0),
        }
    }
}

impl TrendPlot {
    /// Render the chart; the trend line is drawn only when `show_trend` is set
    pub fn render(&self, ui: &mut Ui, view: &ChartView, show_trend: bool) {
        ui.label(egui::RichText::new(&view.title).strong());

        let axis_view = view.clone();
        let count = view.points.len();

        let plot = Plot::new("trend_plot")
            .height(self.height)
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label("Time")
            .y_axis_label(view.y_label.clone())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .x_grid_spacer(|grid_input| index_grid_marks(grid_input.bounds))
            .x_axis_formatter(move |mark, _range| {
                axis_view
                    .time_label_at(mark.value)
                    .unwrap_or_default()
                    .to_string()
            })
            .include_x(-0.5)
            .include_x(count.max(1) as f64 - 0.5);

        plot.show(ui, |plot_ui| {
            if view.points.is_empty() {
                return;
            }

            let points = Points::new(view.y_label.clone(), PlotPoints::from(view.points.clone()))
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(self.point_radius)
                .color(self.point_color);
            plot_ui.points(points);

            if let (true, Some(trend)) = (show_trend, &view.trend) {
                let line = Line::new(REGRESSION_LEGEND, PlotPoints::from(trend.clone()))
                    .color(self.trend_color)
                    .width(self.line_width);
                plot_ui.line(line);
            }
        });
    }
}

/// Grid marks on every whole index inside the visible range
fn index_grid_marks(bounds: (f64, f64)) -> Vec<GridMark> {
    let (min, max) = bounds;
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }

    let start = min.ceil().max(0.0) as i64;
    let end = max.floor() as i64;
    (start..=end)
        .map(|i| GridMark {
            value: i as f64,
            step_size: 1.0,
        })
        .collect()
}

/// Location plot configuration
#[derive(Debug, Clone)]
pub struct LocationPlot {
    pub height: f32,
    pub marker_radius: f32,
    pub marker_color: Color32,
}

impl Default for LocationPlot {
    fn default() -> Self {
        Self {
            height: 260.0,
            marker_radius: 8.0,
            marker_color: Color32::from_rgb(220, 60, 60),
        }
    }
}

impl LocationPlot {
    pub fn render(&self, ui: &mut Ui, view: &LocationView) {
        let min = view.min;
        let max = view.max;

        let plot = Plot::new("location_plot")
            .height(self.height)
            .legend(Legend::default().position(Corner::LeftTop))
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);

        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            plot_ui.set_auto_bounds(egui::Vec2b::new(false, false));

            let marker = Points::new(
                view.label.clone(),
                PlotPoints::from(vec![[view.longitude, view.latitude]]),
            )
            .shape(MarkerShape::Circle)
            .filled(true)
            .radius(self.marker_radius)
            .color(self.marker_color);
            plot_ui.points(marker);
        });
    }
}
