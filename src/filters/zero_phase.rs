//! Forward-backward (zero-phase) filtering.
//!
//! Running a causal IIR filter delays each frequency by a different amount.
//! Running it again over the time-reversed output applies the opposite delay,
//! so the two passes cancel: the combined response is `|H(f)|²` with no phase
//! shift at all.
//!
//! Both ends of the signal are extended by odd reflection before filtering,
//! and each pass starts from the steady state for its first sample, so the
//! start-up transient is small and lands in the padding that gets trimmed.

use super::biquad::{BiquadState, SecondOrderSection};
use super::butterworth::FilterCoefficients;
use crate::Waveform;

/// Applies designed filter coefficients forward and backward.
///
/// # Examples
///
/// ```
/// use quietwave::{FilterSpec, Waveform, ZeroPhaseFilter, butterworth_lowpass};
///
/// let coeffs = butterworth_lowpass(&FilterSpec::new(1000.0, 44100, 4)).unwrap();
/// let input = Waveform::new(vec![0.25; 1000], 44100).unwrap();
/// let output = ZeroPhaseFilter::new(&coeffs).apply(&input);
/// assert_eq!(output.len(), input.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ZeroPhaseFilter<'a> {
    coeffs: &'a FilterCoefficients,
}

impl<'a> ZeroPhaseFilter<'a> {
    pub fn new(coeffs: &'a FilterCoefficients) -> Self {
        Self { coeffs }
    }

    /// Number of reflected samples added at each end for a signal of `len`.
    ///
    /// Three times the length of the filter's difference equation, capped so
    /// the reflection never reaches past the opposite end.
    pub fn pad_len(&self, len: usize) -> usize {
        let taps = 2 * self.coeffs.sections().len() + 1;
        (3 * taps).min(len.saturating_sub(1))
    }

    /// Filters `waveform`, returning a waveform of the same length and rate.
    pub fn apply(&self, waveform: &Waveform) -> Waveform {
        let samples = self.apply_slice(waveform.samples());
        Waveform::from_parts(samples, waveform.sample_rate())
    }

    /// Filters raw samples. An empty slice yields an empty vector.
    ///
    /// Inputs shorter than about `3 * (2 * sections + 1)` samples cannot be
    /// fully padded, so edge transients dominate the output. The length is
    /// still preserved.
    pub fn apply_slice(&self, input: &[f64]) -> Vec<f64> {
        if input.is_empty() {
            return Vec::new();
        }
        let pad = self.pad_len(input.len());
        let mut buffer = odd_extend(input, pad);
        let sections = self.coeffs.sections();

        run_cascade(sections, &mut buffer);
        buffer.reverse();
        run_cascade(sections, &mut buffer);
        buffer.reverse();

        buffer.truncate(buffer.len() - pad);
        buffer.drain(..pad);
        buffer
    }
}

/// Zero-phase filters `waveform` with `coeffs`.
pub fn filtfilt(coeffs: &FilterCoefficients, waveform: &Waveform) -> Waveform {
    ZeroPhaseFilter::new(coeffs).apply(waveform)
}

/// One causal pass of the whole cascade, in place.
///
/// Each section starts in the steady state for the first sample it will see,
/// which is the first input scaled by the DC gain of the sections before it.
fn run_cascade(sections: &[SecondOrderSection], signal: &mut [f64]) {
    let Some(&first) = signal.first() else {
        return;
    };
    let mut level = first;
    for section in sections {
        let mut state = BiquadState::steady(section, level);
        level *= section.dc_gain();
        for sample in signal.iter_mut() {
            *sample = state.run(section, *sample);
        }
    }
}

/// Extends `x` by `pad` samples at each end, reflecting through the end
/// points: `2*x[0] - x[i]` before the start and `2*x[n-1] - x[n-1-i]` after
/// the end.
fn odd_extend(x: &[f64], pad: usize) -> Vec<f64> {
    debug_assert!(pad < x.len());
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];

    let mut out = Vec::with_capacity(n + 2 * pad);
    out.extend((1..=pad).rev().map(|i| 2.0 * first - x[i]));
    out.extend_from_slice(x);
    out.extend((1..=pad).map(|i| 2.0 * last - x[n - 1 - i]));
    out
}
