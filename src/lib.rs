//! Quietwave - add noise to a waveform, then take it out again.
//!
//! The crate takes a mono waveform (decoded from a WAV file or synthesized as
//! a 440 Hz test tone), adds Gaussian noise, designs a Butterworth low-pass
//! filter and applies it forward and backward so the result has no phase
//! shift. All three waveforms come back for inspection.
//!
//! ```
//! use quietwave::{Pipeline, PipelineConfig, analysis};
//! use rand::SeedableRng;
//!
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let result = pipeline.run(None, &mut rng).unwrap();
//!
//! let peak = analysis::dominant_frequency(&result.filtered);
//! assert!((peak - 440.0).abs() < 2.0);
//! ```

pub mod analysis;
mod config;
pub mod core;
mod error;
pub mod filters;
pub mod noise;
pub mod oscillators;
mod pipeline;
pub mod source;
mod waveform;

pub use config::PipelineConfig;
pub use crate::core::{AudioSignal, Signal};
pub use error::{Error, ErrorKind, SourceError};
pub use filters::{
    FilterCoefficients, FilterSpec, SecondOrderSection, ZeroPhaseFilter, butterworth_lowpass,
    filtfilt,
};
pub use noise::{GaussianNoise, NoiseConfig, NoiseInjector, add_noise};
pub use oscillators::SineOscillator;
pub use pipeline::{Pipeline, PipelineResult};
#[cfg(feature = "wav")]
pub use source::{WavFileSource, source_for_path};
pub use source::{SignalKind, SyntheticTone, ToneConfig, WaveformSource};
pub use waveform::{Waveform, downmix};

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
