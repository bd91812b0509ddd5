use crate::sampler::{ParameterEdit, WaveformSampler};
use crate::wave::WaveParameters;
use crate::wave_plotter::{LineStyle, PlotStyle, MAX_PLOT_SIZE, MIN_PLOT_SIZE};
use egui::{Color32, ComboBox, DragValue, Grid, Ui};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{requested} samples requested, the limit is {limit}")]
pub struct SampleLimitExceeded {
    pub requested: usize,
    pub limit: usize,
}

/// Something the user changed in the form this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormAction {
    Parameter(ParameterEdit),
    PlotSize([f32; 2]),
    LineStyle(LineStyle),
    Color(Color32),
}

/// Widgets bound to the wave parameters and the plot appearance.
///
/// The form keeps its own copy of the values shown in the widgets and only
/// forwards an edit to the sampler when the resulting sample count stays
/// within `max_samples`.
#[derive(Clone, Debug)]
pub struct ParameterForm {
    values: WaveParameters,
    max_samples: usize,
    plot_size: [f32; 2],
    line_style: LineStyle,
    color: Color32,
    pub show_advanced: bool,
    pub show_visualization: bool,
}

impl ParameterForm {
    pub fn new(parameters: WaveParameters, style: PlotStyle, plot_size: [f32; 2], max_samples: usize) -> Self {
        ParameterForm {
            values: parameters,
            max_samples,
            plot_size,
            line_style: style.line_style,
            color: style.color32(),
            show_advanced: false,
            show_visualization: false,
        }
    }

    /// Resynchronises the widgets with the sampler's parameters.
    pub fn refresh(&mut self, parameters: WaveParameters) {
        self.values = parameters;
    }

    /// Forwards `edit` to the sampler unless it would grow the series past the
    /// sample limit, in which case the widgets are reset to the sampler's
    /// current values. Edits that don't add samples always pass, even when the
    /// current series is already over the limit.
    pub fn submit(
        &mut self,
        sampler: &mut WaveformSampler,
        edit: ParameterEdit,
    ) -> Result<(), SampleLimitExceeded> {
        let requested = edit.applied_to(sampler.parameters()).expected_sample_count();

        if requested > self.max_samples && requested > sampler.samples().len() {
            log::warn!(
                "Refused {:?}: {} samples exceeds the limit of {}",
                edit,
                requested,
                self.max_samples
            );
            self.refresh(sampler.parameters());
            return Err(SampleLimitExceeded {
                requested,
                limit: self.max_samples,
            });
        }

        sampler.apply(edit);
        self.refresh(sampler.parameters());
        Ok(())
    }

    pub fn render(&mut self, ui: &mut Ui) -> Vec<FormAction> {
        let mut actions = vec![];

        ui.heading("Wave parameters");
        Grid::new("wave_parameters").num_columns(2).show(ui, |ui| {
            ui.label("Oscillation frequency");
            if ui
                .add(DragValue::new(&mut self.values.oscillation_frequency).speed(1.0).range(0.0..=f64::MAX).suffix(" Hz"))
                .changed()
            {
                actions.push(FormAction::Parameter(ParameterEdit::OscillationFrequency(
                    self.values.oscillation_frequency,
                )));
            }
            ui.end_row();

            ui.label("Number of periods");
            if ui
                .add(DragValue::new(&mut self.values.number_of_periods).speed(0.1).range(0..=i32::MAX))
                .changed()
            {
                actions.push(FormAction::Parameter(ParameterEdit::NumberOfPeriods(
                    self.values.number_of_periods,
                )));
            }
            ui.end_row();

            ui.label("Initial delay");
            if ui
                .add(DragValue::new(&mut self.values.initial_delay).speed(1.0).range(0.0..=360.0).suffix("°"))
                .changed()
            {
                actions.push(FormAction::Parameter(ParameterEdit::InitialDelay(self.values.initial_delay)));
            }
            ui.end_row();

            ui.label("Sampling frequency");
            if ui
                .add(DragValue::new(&mut self.values.sampling_frequency).speed(10.0).range(0.0..=f64::MAX).suffix(" Hz"))
                .changed()
            {
                actions.push(FormAction::Parameter(ParameterEdit::SamplingFrequency(
                    self.values.sampling_frequency,
                )));
            }
            ui.end_row();
        });

        ui.separator();
        ui.checkbox(&mut self.show_advanced, "Advanced features");
        if self.show_advanced {
            Grid::new("advanced_features").num_columns(2).show(ui, |ui| {
                ui.label("Amplitude");
                if ui
                    .add(DragValue::new(&mut self.values.amplitude).speed(0.1).range(0.0..=f64::MAX))
                    .changed()
                {
                    actions.push(FormAction::Parameter(ParameterEdit::Amplitude(self.values.amplitude)));
                }
                ui.end_row();

                ui.label("Attenuation factor");
                if ui
                    .add(DragValue::new(&mut self.values.attenuation_factor).speed(0.1).range(0.0..=f64::MAX).suffix(" 1/s"))
                    .changed()
                {
                    actions.push(FormAction::Parameter(ParameterEdit::AttenuationFactor(
                        self.values.attenuation_factor,
                    )));
                }
                ui.end_row();
            });
        }

        ui.separator();
        ui.checkbox(&mut self.show_visualization, "Visualization features");
        if self.show_visualization {
            self.render_visualization(ui, &mut actions);
        }

        actions
    }

    fn render_visualization(&mut self, ui: &mut Ui, actions: &mut Vec<FormAction>) {
        Grid::new("visualization_features").num_columns(2).show(ui, |ui| {
            ui.label("Data window width");
            let width = ui.add(
                DragValue::new(&mut self.plot_size[0])
                    .speed(1.0)
                    .range(MIN_PLOT_SIZE[0]..=MAX_PLOT_SIZE[0]),
            );
            ui.end_row();

            ui.label("Data window height");
            let height = ui.add(
                DragValue::new(&mut self.plot_size[1])
                    .speed(1.0)
                    .range(MIN_PLOT_SIZE[1]..=MAX_PLOT_SIZE[1]),
            );
            ui.end_row();

            if width.changed() || height.changed() {
                actions.push(FormAction::PlotSize(self.plot_size));
            }

            ui.label("Line style");
            let previous = self.line_style;
            ComboBox::from_id_source("line_style")
                .selected_text(self.line_style.label())
                .show_ui(ui, |ui| {
                    for style in LineStyle::ALL {
                        ui.selectable_value(&mut self.line_style, style, style.label());
                    }
                });
            if self.line_style != previous {
                actions.push(FormAction::LineStyle(self.line_style));
            }
            ui.end_row();

            ui.label("Color");
            if ui.color_edit_button_srgba(&mut self.color).changed() {
                actions.push(FormAction::Color(self.color));
            }
            ui.end_row();
        });
    }
}
