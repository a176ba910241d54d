//! Sine wave oscillator implementation.

use crate::{AudioSignal, Signal};
use std::f64::consts::PI;

/// A sine wave oscillator.
///
/// Sample `n` is `sin(2π · frequency · n / sample_rate)`. The phase is kept as
/// a sample counter rather than an accumulated increment, so long tones do
/// not drift.
///
/// # Examples
///
/// ```
/// use quietwave::{Signal, SineOscillator};
///
/// // 440 Hz (A4) at 44.1 kHz
/// let mut osc = SineOscillator::new(440.0, 44100);
/// assert_eq!(osc.next_sample(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SineOscillator {
    frequency: f64,
    sample_rate: u32,
    /// Index of the next sample to generate
    position: u64,
}

impl SineOscillator {
    /// Creates a new sine oscillator starting at phase zero.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Frequency of the sine wave in Hz
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(frequency: f64, sample_rate: u32) -> Self {
        Self {
            frequency,
            sample_rate,
            position: 0,
        }
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Rewinds the oscillator to phase zero.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl Signal for SineOscillator {
    fn next_sample(&mut self) -> f64 {
        let t = self.position as f64 / self.sample_rate as f64;
        self.position += 1;
        (2.0 * PI * self.frequency * t).sin()
    }
}

impl AudioSignal for SineOscillator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oscillator_creation() {
        let osc = SineOscillator::new(440.0, 44100);
        assert_eq!(osc.frequency(), 440.0);
        assert_eq!(osc.sample_rate(), 44100);
    }

    #[test]
    fn test_first_sample_is_zero() {
        let mut osc = SineOscillator::new(440.0, 44100);
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn test_quarter_period_peak() {
        // 1 kHz at 4 kHz: samples walk 0, 1, 0, -1
        let mut osc = SineOscillator::new(1000.0, 4000);
        let samples = osc.take_samples(4);
        assert!(samples[0].abs() < 1e-12);
        assert!((samples[1] - 1.0).abs() < 1e-12);
        assert!(samples[2].abs() < 1e-12);
        assert!((samples[3] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_range() {
        let mut osc = SineOscillator::new(440.0, 44100);
        for _ in 0..44100 {
            let sample = osc.next_sample();
            assert!((-1.0..=1.0).contains(&sample));
        }
    }

    #[test]
    fn test_reset() {
        let mut osc = SineOscillator::new(440.0, 44100);
        let first = osc.take_samples(100);
        osc.reset();
        assert_eq!(osc.take_samples(100), first);
    }

    #[test]
    fn test_zero_frequency() {
        let mut osc = SineOscillator::new(0.0, 44100);
        assert_eq!(osc.next_sample(), osc.next_sample());
    }
}
