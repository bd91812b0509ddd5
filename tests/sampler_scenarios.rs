use sinusoidal_wave_generator::{WaveParameters, WaveformSampler};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

const TOLERANCE: f64 = 1e-9;

fn sampler_with(parameters: WaveParameters) -> WaveformSampler {
    let mut sampler = WaveformSampler::new();
    sampler.set_parameters(parameters);
    sampler
}

fn expected_elongation(parameters: &WaveParameters, t: f64) -> f64 {
    let attenuation = (1.0 - parameters.attenuation_factor * t).max(0.0);
    parameters.amplitude
        * attenuation
        * (2.0 * PI * parameters.oscillation_frequency * t + parameters.initial_delay * PI / 180.0).sin()
}

#[test]
fn one_hertz_sampled_four_times_per_second() {
    let sampler = sampler_with(WaveParameters {
        amplitude: 1.0,
        oscillation_frequency: 1.0,
        initial_delay: 0.0,
        number_of_periods: 1,
        sampling_frequency: 4.0,
        attenuation_factor: 0.0,
    });

    let samples = sampler.samples();

    // the boundary sample at t = tmax is kept
    assert_eq!(samples.time_samples(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
    let expected = [0.0, 1.0, 0.0, -1.0, 0.0];
    for (actual, expected) in samples.elongation_samples().iter().zip(expected) {
        assert!((actual - expected).abs() < TOLERANCE, "{actual} != {expected}");
    }
}

#[test]
fn zero_oscillation_frequency_gives_empty_series() {
    let sampler = sampler_with(WaveParameters {
        oscillation_frequency: 0.0,
        ..Default::default()
    });

    assert!(sampler.samples().time_samples().is_empty());
    assert!(sampler.samples().elongation_samples().is_empty());
}

#[test]
fn zero_periods_gives_single_origin_sample() {
    let parameters = WaveParameters {
        amplitude: 2.5,
        initial_delay: 60.0,
        number_of_periods: 0,
        ..Default::default()
    };
    let sampler = sampler_with(parameters);

    let samples = sampler.samples();

    assert_eq!(samples.time_samples(), &[0.0]);
    assert!((samples.elongation_samples()[0] - 2.5 * 60f64.to_radians().sin()).abs() < TOLERANCE);
}

#[test]
fn strong_attenuation_flattens_to_exact_zero() {
    let parameters = WaveParameters {
        oscillation_frequency: 1.0,
        number_of_periods: 2,
        sampling_frequency: 100.0,
        attenuation_factor: 2.0,
        ..Default::default()
    };
    let sampler = sampler_with(parameters);

    for (t, e) in sampler.samples().points() {
        if t >= 0.5 {
            assert_eq!(e, 0.0, "t = {t}");
        }
    }

    // and it is really damped before that
    let samples = sampler.samples();
    assert!((samples.elongation_samples()[25] - 0.5).abs() < TOLERANCE);
}

#[test]
fn negative_periods_give_empty_series() {
    let sampler = sampler_with(WaveParameters {
        number_of_periods: -3,
        ..Default::default()
    });

    assert!(sampler.samples().is_empty());
}

#[test]
fn negative_oscillation_frequency_needs_negative_periods() {
    let forward = sampler_with(WaveParameters {
        oscillation_frequency: -100.0,
        number_of_periods: 1,
        ..Default::default()
    });
    assert!(forward.samples().is_empty());

    let parameters = WaveParameters {
        oscillation_frequency: -100.0,
        number_of_periods: -1,
        ..Default::default()
    };
    let sampler = sampler_with(parameters);
    let samples = sampler.samples();

    assert_eq!(samples.len(), 101);
    assert!((samples.time_samples().last().unwrap() - 0.01).abs() < TOLERANCE);
    for (t, e) in samples.points() {
        assert!((e - expected_elongation(&parameters, t)).abs() < TOLERANCE);
    }
}

#[test]
fn infinite_oscillation_frequency_gives_one_undefined_sample() {
    let sampler = sampler_with(WaveParameters {
        oscillation_frequency: f64::INFINITY,
        ..Default::default()
    });

    assert_eq!(sampler.samples().time_samples(), &[0.0]);
    assert!(sampler.samples().elongation_samples()[0].is_nan());
}

#[test]
fn absurd_sampling_frequency_does_not_abort() {
    let mut sampler = WaveformSampler::new();

    sampler.set_sampling_frequency(1e300);

    assert_eq!(sampler.parameters().sampling_frequency, 1e300);
    assert!(sampler.samples().is_empty());

    sampler.set_sampling_frequency(10_000.0);
    assert_eq!(sampler.samples().len(), 101);
}

#[test]
fn samples_follow_the_closed_form() {
    let parameter_sets = [
        WaveParameters::default(),
        WaveParameters {
            amplitude: 4.0,
            oscillation_frequency: 7.5,
            initial_delay: 123.0,
            number_of_periods: 3,
            sampling_frequency: 311.0,
            attenuation_factor: 1.25,
        },
        WaveParameters {
            amplitude: -1.0,
            oscillation_frequency: 0.5,
            initial_delay: 359.0,
            number_of_periods: 4,
            sampling_frequency: 20.0,
            attenuation_factor: -0.3,
        },
    ];

    for parameters in parameter_sets {
        let sampler = sampler_with(parameters);
        let samples = sampler.samples();

        assert!(!samples.is_empty());
        assert_eq!(samples.time_samples().len(), samples.elongation_samples().len());
        assert_eq!(samples.time_samples()[0], 0.0);

        let dt = 1.0 / parameters.sampling_frequency;
        for pair in samples.time_samples().windows(2) {
            assert!(pair[1] >= pair[0]);
            assert!((pair[1] - pair[0] - dt).abs() < TOLERANCE);
        }

        let tmax = parameters.duration();
        assert!(*samples.time_samples().last().unwrap() <= tmax + TOLERANCE);
        assert!(*samples.time_samples().last().unwrap() + dt > tmax);

        for (t, e) in samples.points() {
            assert!((e - expected_elongation(&parameters, t)).abs() < TOLERANCE);
        }
    }
}

#[test]
fn observer_reads_new_data_inside_notification() {
    let mut sampler = WaveformSampler::new();
    let observed = Rc::new(RefCell::new(vec![]));

    let sink = observed.clone();
    sampler.on_change(move |sampler| {
        let samples = sampler.samples();
        sink.borrow_mut().push((
            sampler.parameters().sampling_frequency,
            samples.len(),
            samples.elongation_samples().len(),
        ));
    });

    sampler.set_sampling_frequency(200.0);
    sampler.set_sampling_frequency(0.0);
    sampler.set_sampling_frequency(-5.0);

    assert_eq!(
        *observed.borrow(),
        vec![(200.0, 3, 3), (0.0, 1, 1), (-5.0, 0, 0)]
    );
}

#[test]
fn repeated_value_is_idempotent() {
    let mut sampler = sampler_with(WaveParameters {
        initial_delay: 33.0,
        attenuation_factor: 40.0,
        ..Default::default()
    });
    let before = sampler.samples().clone();

    sampler.set_initial_delay(33.0);
    sampler.set_amplitude(1.0);
    sampler.set_number_of_periods(1);

    assert_eq!(sampler.samples(), &before);
}
