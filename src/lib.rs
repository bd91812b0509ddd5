pub mod config;
pub mod dialogs;
pub mod export;
pub mod menu_bar;
pub mod parameter_form;
pub mod sampler;
pub mod wave;
pub mod wave_plotter;

pub use sampler::{ParameterEdit, WaveformSampler};
pub use wave::{SampleSeries, WaveParameters};
