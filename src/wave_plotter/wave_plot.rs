use crate::wave::SampleSeries;
use crate::wave_plotter::util::Extent;
use crate::wave_plotter::{LineStyle, PlotStyle};
use egui_plot::{Line, MarkerShape, PlotPoints, PlotUi, Points};

/// Fraction of the vertical extent a jump must exceed to survive downsampling.
const SPIKE_FRACTION: f64 = 0.2;

#[derive(Clone, Debug)]
pub(crate) struct WavePlot {
    pub series: SampleSeries,
    pub extent: Extent,
}

impl WavePlot {
    pub(crate) fn draw_wave(&self, plot_ui: &mut PlotUi, style: &PlotStyle, max_visible_points: usize) {
        let plot_bounds = plot_ui.plot_bounds();

        let values = visible_points(
            &self.series,
            plot_bounds.min()[0],
            plot_bounds.max()[0],
            max_visible_points,
            SPIKE_FRACTION * self.extent.height(),
        );

        if values.is_empty() {
            return;
        }

        match style.line_style {
            LineStyle::None => {
                let points = Points::new(PlotPoints::new(values))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(3.0)
                    .color(style.color32())
                    .name("Equation");
                plot_ui.points(points);
            }
            LineStyle::Line => {
                let line = Line::new(PlotPoints::new(values))
                    .color(style.color32())
                    .name("Equation");
                plot_ui.line(line);
            }
        }
    }

    pub(crate) fn new(series: SampleSeries, extent: Extent) -> Self {
        WavePlot { series, extent }
    }
}

/// Samples inside `[min_x, max_x]` plus one neighbour on each side, thinned to
/// about `max_points`. A sample that jumps more than `spike_threshold` from the
/// last kept one is always kept.
pub(crate) fn visible_points(
    series: &SampleSeries,
    min_x: f64,
    max_x: f64,
    max_points: usize,
    spike_threshold: f64,
) -> Vec<[f64; 2]> {
    let time = series.time_samples();
    let elongation = series.elongation_samples();

    // time is sorted, so the window is a contiguous range
    let start = time.partition_point(|&t| t < min_x).saturating_sub(1);
    let end = (time.partition_point(|&t| t <= max_x) + 1).min(time.len());

    if start >= end {
        return vec![];
    }

    let total_points = end - start;
    let step = if total_points > max_points.max(1) {
        total_points / max_points.max(1)
    } else {
        1
    };

    let mut values: Vec<[f64; 2]> = Vec::with_capacity(total_points / step + 1);
    let mut last_y = elongation[start];
    for (i, index) in (start..end).enumerate() {
        let y = elongation[index];
        if i % step == 0 || (y - last_y).abs() > spike_threshold {
            values.push([time[index], y]);
            last_y = y;
        }
    }

    values
}
