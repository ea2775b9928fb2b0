use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::charts::{ChartData, ChartSpec, ScatterSeries, Slice};
use crate::color::ColorMap;

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(229, 9, 20);

// ---------------------------------------------------------------------------
// One dashboard panel
// ---------------------------------------------------------------------------

/// Render a titled chart panel.
pub fn chart_panel(ui: &mut Ui, spec: &ChartSpec) {
    ui.group(|ui: &mut Ui| {
        ui.strong(&spec.title);

        if spec.is_empty() {
            ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new("No data for this selection").weak());
                });
            });
            return;
        }

        match &spec.data {
            ChartData::Bar { bars, horizontal } => bar_plot(ui, spec, bars, *horizontal),
            ChartData::Line { points } => line_plot(ui, spec, points),
            ChartData::Scatter { series } => scatter_plot(ui, spec, series),
            ChartData::Pie { slices } => pie_plot(ui, spec, slices),
        }
    });
}

fn base_plot(spec: &ChartSpec) -> Plot<'_> {
    Plot::new(spec.id)
        .height(CHART_HEIGHT)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, spec: &ChartSpec, bars: &[Slice], horizontal: bool) {
    let n = bars.len();
    // Horizontal charts list the first bar at the top.
    let position = move |i: usize| if horizontal { (n - 1 - i) as f64 } else { i as f64 };

    let chart_bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            Bar::new(position(i), slice.value)
                .name(&slice.label)
                .width(0.7)
                .fill(BAR_COLOR)
        })
        .collect();

    let mut chart = BarChart::new(chart_bars).color(BAR_COLOR);
    if horizontal {
        chart = chart.horizontal();
    }

    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    let category_label = move |value: f64| -> String {
        if (value - value.round()).abs() > 1e-6 || value < 0.0 {
            return String::new();
        }
        let slot = value.round() as usize;
        if slot >= labels.len() {
            return String::new();
        }
        let index = if horizontal { labels.len() - 1 - slot } else { slot };
        labels[index].clone()
    };

    let plot = base_plot(spec);
    let plot = if horizontal {
        plot.y_axis_formatter(move |mark, _range| category_label(mark.value))
    } else {
        plot.x_axis_formatter(move |mark, _range| category_label(mark.value))
    };

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
    });
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

fn line_plot(ui: &mut Ui, spec: &ChartSpec, points: &[[f64; 2]]) {
    base_plot(spec).show(ui, |plot_ui| {
        let series: PlotPoints = points.iter().copied().collect();
        plot_ui.line(Line::new(series).color(BAR_COLOR).width(1.5));
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_plot(ui: &mut Ui, spec: &ChartSpec, series: &[ScatterSeries]) {
    let colors = ColorMap::new(series.iter().map(|s| s.name.as_str()));

    // Hovering a point shows its title.
    let lookup: Vec<(String, Vec<([f64; 2], String)>)> = series
        .iter()
        .map(|s| {
            let points = s
                .points
                .iter()
                .map(|p| ([p.release_year as f64, p.duration], p.title.clone()))
                .collect();
            (s.name.clone(), points)
        })
        .collect();

    base_plot(spec)
        .legend(Legend::default())
        .label_formatter(move |name, value| {
            let title = lookup
                .iter()
                .filter(|(series_name, _)| series_name == name)
                .flat_map(|(_, points)| points.iter())
                .find(|(xy, _)| xy[0] == value.x && xy[1] == value.y)
                .map(|(_, title)| title.as_str());
            match title {
                Some(title) => format!("{title}\n{name}\nyear {:.0}, duration {:.0}", value.x, value.y),
                None => format!("year {:.0}\nduration {:.0}", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s
                    .points
                    .iter()
                    .map(|p| [p.release_year as f64, p.duration])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&s.name)
                        .color(colors.color_for(&s.name))
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Largest angle drawn as one polygon; keeps every piece convex.
const MAX_WEDGE: f64 = FRAC_PI_2;
const ARC_STEPS_PER_TURN: f64 = 96.0;

/// Outline of the wedge between `start` and `end` (radians) of the unit circle.
fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU) * ARC_STEPS_PER_TURN).ceil().max(1.0) as usize;
    let mut outline = Vec::with_capacity(steps + 2);
    outline.push([0.0, 0.0]);
    for k in 0..=steps {
        let a = start + (end - start) * k as f64 / steps as f64;
        outline.push([a.cos(), a.sin()]);
    }
    outline
}

fn pie_plot(ui: &mut Ui, spec: &ChartSpec, slices: &[Slice]) {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    let colors = ColorMap::new(slices.iter().map(|s| s.label.as_str()));

    Plot::new(spec.id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .label_formatter(|name, _| name.to_string())
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock.
            let mut angle = FRAC_PI_2;
            for slice in slices {
                let span = TAU * slice.value / total;
                let share = 100.0 * slice.value / total;
                let name = format!("{} ({share:.1}%)", slice.label);
                let color = colors.color_for(&slice.label);

                let end = angle - span;
                let mut from = angle;
                while from > end {
                    let to = (from - MAX_WEDGE).max(end);
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge(to, from)))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                    from = to;
                }
                angle = end;
            }
        });
}
