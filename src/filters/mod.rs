//! Low-pass filter design and zero-phase application.
//!
//! - `butterworth`: validated [`FilterSpec`] in, [`FilterCoefficients`] out
//! - `biquad`: the second-order sections the design is built from
//! - `zero_phase`: forward-backward application with edge reflection

mod biquad;
mod butterworth;
mod zero_phase;

pub use biquad::{BiquadState, SecondOrderSection};
pub use butterworth::{FilterCoefficients, FilterSpec, butterworth_lowpass};
pub use zero_phase::{ZeroPhaseFilter, filtfilt};
