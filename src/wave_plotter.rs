mod plot_selection;
pub mod util;
mod wave_plot;

use crate::wave::SampleSeries;
use crate::wave_plotter::plot_selection::PlotSelection;
use crate::wave_plotter::util::{calculate_bounds, series_extent};
use crate::wave_plotter::wave_plot::WavePlot;
use egui::{Color32, Context, Key, Ui, Vec2b, Window};
use egui_plot::{Legend, Plot, PlotResponse};
use serde::{Deserialize, Serialize};

const MAX_NUMB_OF_POINTS: usize = 100_000;

pub const MIN_PLOT_SIZE: [f32; 2] = [200.0, 150.0];
pub const MAX_PLOT_SIZE: [f32; 2] = [4096.0, 4096.0];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Scatter discs only.
    #[default]
    None,
    Line,
}

impl LineStyle {
    pub const ALL: [LineStyle; 2] = [LineStyle::None, LineStyle::Line];

    pub fn label(&self) -> &'static str {
        match self {
            LineStyle::None => "None",
            LineStyle::Line => "Line",
        }
    }
}

/// How the series is drawn, on screen and in exported images.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotStyle {
    pub line_style: LineStyle,
    /// sRGB.
    pub color: [u8; 3],
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            line_style: LineStyle::None,
            color: [0, 0, 255],
        }
    }
}

impl PlotStyle {
    pub fn color32(&self) -> Color32 {
        let [r, g, b] = self.color;
        Color32::from_rgb(r, g, b)
    }

    pub fn set_color32(&mut self, color: Color32) {
        self.color = [color.r(), color.g(), color.b()];
    }
}

/// What the plot window did with this frame's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotOutcome {
    Idle,
    /// Escape was pressed with no zoom left to undo.
    EscapeUnhandled,
}

#[derive(Clone, Debug)]
pub struct WavePlotter {
    title: String,
    plot: WavePlot,
    plot_selection: PlotSelection,
    style: PlotStyle,
    size: [f32; 2],
    max_points: usize,
}

impl WavePlotter {
    /// Replaces the drawn samples and rescales the axes to them.
    pub fn load_series(&mut self, series: &SampleSeries) {
        let extent = series_extent(series);
        self.plot = WavePlot::new(series.clone(), extent);
        self.plot_selection.reset(calculate_bounds(series));

        log::debug!("Plot \"{}\" loaded {} samples", self.title, series.len());
    }

    pub fn style(&self) -> PlotStyle {
        self.style
    }

    pub fn set_line_style(&mut self, line_style: LineStyle) {
        self.style.line_style = line_style;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.style.set_color32(color);
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    pub fn set_size(&mut self, size: [f32; 2]) {
        self.size = [
            size[0].clamp(MIN_PLOT_SIZE[0], MAX_PLOT_SIZE[0]),
            size[1].clamp(MIN_PLOT_SIZE[1], MAX_PLOT_SIZE[1]),
        ];
    }

    pub fn series(&self) -> &SampleSeries {
        &self.plot.series
    }

    pub fn render(&mut self, ctx: &Context) -> PlotOutcome {
        let mut outcome = PlotOutcome::Idle;

        Window::new(&self.title)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                outcome = self.process_zoom_input(ui);
                self.render_plot(ui);

                if let Some(range) = self
                    .plot_selection
                    .get_selected_data_range_indices(&self.plot.series)
                {
                    ui.label(format!(
                        "Selected samples {}..{}, Points: {}",
                        range.start,
                        range.end,
                        range.len()
                    ));
                } else {
                    ui.label(format!("Samples: {}", self.plot.series.len()));
                }
            });

        outcome
    }

    fn render_plot(&mut self, ui: &mut Ui) {
        let plot = Plot::new("wave_plot")
            .width(self.size[0])
            .height(self.size[1])
            .legend(Legend::default())
            .x_axis_label("time [seconds]")
            .y_axis_label("elongation [units]")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .auto_bounds(Vec2b::FALSE)
            .allow_double_click_reset(false)
            .allow_boxed_zoom(false);

        let plot_response: PlotResponse<()> = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(self.plot_selection.get_plot_bounds());

            self.plot.draw_wave(plot_ui, &self.style, self.max_points);
            self.plot_selection.draw_selection_box(plot_ui);
        });

        self.plot_selection.update_selection(&plot_response);
    }

    fn process_zoom_input(&mut self, ui: &Ui) -> PlotOutcome {
        if ui.input(|input| input.key_pressed(Key::Enter)) {
            self.plot_selection.select_zoom();
        }

        if ui.input(|input| input.key_pressed(Key::Escape)) && !self.plot_selection.revert_zoom() {
            return PlotOutcome::EscapeUnhandled;
        }

        PlotOutcome::Idle
    }

    pub fn new(title: impl Into<String>, style: PlotStyle, size: [f32; 2]) -> Self {
        let series = SampleSeries::new();

        let mut plotter = WavePlotter {
            title: title.into(),
            plot: WavePlot::new(series.clone(), series_extent(&series)),
            plot_selection: PlotSelection::new(calculate_bounds(&series)),
            style,
            size: MIN_PLOT_SIZE,
            max_points: MAX_NUMB_OF_POINTS,
        };
        plotter.set_size(size);
        plotter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wave::WaveParameters;

    #[test]
    fn loading_rescales_to_new_data() {
        let mut plotter = WavePlotter::new("Equation", PlotStyle::default(), [640.0, 480.0]);

        plotter.load_series(&SampleSeries::generate(&WaveParameters {
            amplitude: 3.0,
            ..Default::default()
        }));

        let bounds = plotter.plot_selection.get_plot_bounds();
        assert!((bounds.max()[1] - 3.0).abs() < 1e-9);
        assert_eq!(plotter.series().len(), 101);
    }

    #[test]
    fn size_is_clamped() {
        let mut plotter = WavePlotter::new("Equation", PlotStyle::default(), [10.0, 10_000.0]);

        assert_eq!(plotter.size(), [MIN_PLOT_SIZE[0], MAX_PLOT_SIZE[1]]);

        plotter.set_size([800.0, 600.0]);
        assert_eq!(plotter.size(), [800.0, 600.0]);
    }

    #[test]
    fn color_round_trips_through_color32() {
        let mut plotter = WavePlotter::new("Equation", PlotStyle::default(), [640.0, 480.0]);

        plotter.set_color(Color32::from_rgb(200, 10, 30));
        plotter.set_line_style(LineStyle::Line);

        assert_eq!(plotter.style().color, [200, 10, 30]);
        assert_eq!(plotter.style().line_style, LineStyle::Line);
    }
}
