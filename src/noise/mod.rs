//! Noise generation and injection.
//!
//! `GaussianNoise` is a sample-by-sample white Gaussian source; `NoiseInjector`
//! validates an amplitude and adds that noise to a whole waveform.

mod gaussian;
mod injector;

pub use gaussian::GaussianNoise;
pub use injector::{NoiseConfig, NoiseInjector, add_noise};
