use rayon::prelude::*;
use std::f64::consts::PI;

/// Above this many samples the elongation values are computed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 65_536;

/// Largest sample count a `Vec<f64>` can address.
pub const MAX_SAMPLE_COUNT: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Relative slack applied to `tmax / dt` so a sample landing on `tmax` survives rounding.
const BOUNDARY_TOLERANCE: f64 = 1e-12;

/// The six parameters of a damped, phase delayed sine wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParameters {
    pub amplitude: f64,
    /// Hertz.
    pub oscillation_frequency: f64,
    /// Degrees.
    pub initial_delay: f64,
    pub number_of_periods: i32,
    /// Hertz.
    pub sampling_frequency: f64,
    /// Units per second. Negative values amplify.
    pub attenuation_factor: f64,
}

impl Default for WaveParameters {
    fn default() -> Self {
        WaveParameters {
            amplitude: 1.0,
            oscillation_frequency: 100.0,
            initial_delay: 0.0,
            number_of_periods: 1,
            sampling_frequency: 10_000.0,
            attenuation_factor: 0.0,
        }
    }
}

impl WaveParameters {
    /// Time span covered by the wave: `number_of_periods` periods of the oscillation.
    pub fn duration(&self) -> f64 {
        self.number_of_periods as f64 * (1.0 / self.oscillation_frequency)
    }

    /// Number of samples a recomputation with these parameters produces.
    ///
    /// Degenerate inputs never fail:
    /// - a zero sampling frequency yields at most the sample at `t = 0`
    /// - a negative, infinite or NaN sampling frequency yields nothing, since
    ///   the time step can't move forward
    /// - a non-finite or negative duration (zero oscillation frequency, negative
    ///   period count) yields nothing
    /// - a count beyond [`MAX_SAMPLE_COUNT`] can't be stored and yields nothing
    pub fn expected_sample_count(&self) -> usize {
        let tmax = self.duration();
        let fs = self.sampling_frequency;

        if !tmax.is_finite() || tmax < 0.0 {
            return 0;
        }

        if fs == 0.0 {
            return 1;
        }

        let dt = 1.0 / fs;
        if !(dt > 0.0) || !fs.is_finite() {
            return 0;
        }

        let span = (tmax * fs * (1.0 + BOUNDARY_TOLERANCE)).floor();
        if !(span < MAX_SAMPLE_COUNT as f64) {
            log::warn!("{} samples can't be stored, sampling nothing", span);
            return 0;
        }

        span as usize + 1
    }

    /// Instant `index` of the sampling grid, `index / sampling_frequency`.
    ///
    /// Computed from the index rather than accumulated so there is no drift.
    pub fn time_at(&self, index: usize) -> f64 {
        if index == 0 {
            return 0.0;
        }
        index as f64 / self.sampling_frequency
    }

    /// Linear attenuation at `t`, clamped at zero.
    pub fn attenuation_at(&self, t: f64) -> f64 {
        let attenuation = 1.0 - self.attenuation_factor * t;
        if attenuation < 0.0 {
            0.0
        } else {
            attenuation
        }
    }

    /// Waveform value at `t` seconds.
    pub fn elongation_at(&self, t: f64) -> f64 {
        self.amplitude
            * self.attenuation_at(t)
            * (2.0 * PI * self.oscillation_frequency * t + self.initial_delay.to_radians()).sin()
    }
}

/// Parallel time and elongation sequences produced by one sampling pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    time: Vec<f64>,
    elongation: Vec<f64>,
}

impl SampleSeries {
    pub fn new() -> SampleSeries {
        SampleSeries {
            time: vec![],
            elongation: vec![],
        }
    }

    /// Samples the wave described by `parameters`.
    pub fn generate(parameters: &WaveParameters) -> SampleSeries {
        let count = parameters.expected_sample_count();

        let mut time = Vec::new();
        let mut elongation = Vec::new();
        if time.try_reserve_exact(count).is_err() || elongation.try_reserve_exact(count).is_err() {
            log::warn!("Could not allocate {} samples, sampling nothing", count);
            return SampleSeries::new();
        }

        time.extend((0..count).map(|i| parameters.time_at(i)));

        if count > PARALLEL_THRESHOLD {
            time.par_iter()
                .map(|&t| parameters.elongation_at(t))
                .collect_into_vec(&mut elongation);
        } else {
            elongation.extend(time.iter().map(|&t| parameters.elongation_at(t)));
        }

        SampleSeries { time, elongation }
    }

    pub fn time_samples(&self) -> &[f64] {
        &self.time
    }

    pub fn elongation_samples(&self) -> &[f64] {
        &self.elongation
    }

    /// `(time, elongation)` pairs in sample order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.elongation.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
