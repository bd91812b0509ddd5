use crate::wave::{SampleSeries, WaveParameters};
use std::fmt;
use std::time::Instant;

type Observer = Box<dyn FnMut(&WaveformSampler)>;

/// A single parameter change, as produced by the parameter form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterEdit {
    Amplitude(f64),
    OscillationFrequency(f64),
    InitialDelay(f64),
    NumberOfPeriods(i32),
    SamplingFrequency(f64),
    AttenuationFactor(f64),
}

impl ParameterEdit {
    /// Returns `parameters` with this edit applied.
    pub fn applied_to(self, parameters: WaveParameters) -> WaveParameters {
        let mut parameters = parameters;
        match self {
            ParameterEdit::Amplitude(value) => parameters.amplitude = value,
            ParameterEdit::OscillationFrequency(value) => parameters.oscillation_frequency = value,
            ParameterEdit::InitialDelay(value) => parameters.initial_delay = value,
            ParameterEdit::NumberOfPeriods(value) => parameters.number_of_periods = value,
            ParameterEdit::SamplingFrequency(value) => parameters.sampling_frequency = value,
            ParameterEdit::AttenuationFactor(value) => parameters.attenuation_factor = value,
        }
        parameters
    }
}

/// Owns the wave parameters and the samples derived from them.
///
/// Every setter recomputes the whole [`SampleSeries`] and then calls the
/// registered observers, in registration order, before returning. Observers
/// get a shared reference to the sampler and read whatever they need from it.
pub struct WaveformSampler {
    parameters: WaveParameters,
    series: SampleSeries,
    observers: Vec<Observer>,
}

impl WaveformSampler {
    pub fn new() -> Self {
        Self::with_parameters(WaveParameters::default())
    }

    /// Solves `parameters` once. Nobody is notified since nobody can be listening yet.
    pub fn with_parameters(parameters: WaveParameters) -> Self {
        WaveformSampler {
            parameters,
            series: SampleSeries::generate(&parameters),
            observers: vec![],
        }
    }

    pub fn parameters(&self) -> WaveParameters {
        self.parameters
    }

    pub fn samples(&self) -> &SampleSeries {
        &self.series
    }

    pub fn on_change(&mut self, observer: impl FnMut(&WaveformSampler) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.parameters.amplitude = amplitude;
        self.solve();
    }

    pub fn set_oscillation_frequency(&mut self, oscillation_frequency: f64) {
        self.parameters.oscillation_frequency = oscillation_frequency;
        self.solve();
    }

    pub fn set_initial_delay(&mut self, initial_delay: f64) {
        self.parameters.initial_delay = initial_delay;
        self.solve();
    }

    pub fn set_number_of_periods(&mut self, number_of_periods: i32) {
        self.parameters.number_of_periods = number_of_periods;
        self.solve();
    }

    pub fn set_sampling_frequency(&mut self, sampling_frequency: f64) {
        self.parameters.sampling_frequency = sampling_frequency;
        self.solve();
    }

    pub fn set_attenuation_factor(&mut self, attenuation_factor: f64) {
        self.parameters.attenuation_factor = attenuation_factor;
        self.solve();
    }

    /// Replaces all six parameters with a single recomputation and notification.
    pub fn set_parameters(&mut self, parameters: WaveParameters) {
        self.parameters = parameters;
        self.solve();
    }

    pub fn apply(&mut self, edit: ParameterEdit) {
        match edit {
            ParameterEdit::Amplitude(value) => self.set_amplitude(value),
            ParameterEdit::OscillationFrequency(value) => self.set_oscillation_frequency(value),
            ParameterEdit::InitialDelay(value) => self.set_initial_delay(value),
            ParameterEdit::NumberOfPeriods(value) => self.set_number_of_periods(value),
            ParameterEdit::SamplingFrequency(value) => self.set_sampling_frequency(value),
            ParameterEdit::AttenuationFactor(value) => self.set_attenuation_factor(value),
        }
    }

    fn solve(&mut self) {
        let start = Instant::now();

        // Build the new series aside and swap it in whole
        self.series = SampleSeries::generate(&self.parameters);

        log::debug!(
            "Solved {:?} into {} samples in {:?}",
            self.parameters,
            self.series.len(),
            start.elapsed()
        );

        self.notify();
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);

        for observer in observers.iter_mut() {
            observer(&*self);
        }

        self.observers = observers;
    }
}

impl Default for WaveformSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WaveformSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveformSampler")
            .field("parameters", &self.parameters)
            .field("samples", &self.series.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
