//! Spectral summaries of waveforms.
//!
//! Used to check, without plotting anything, that filtering kept the tone and
//! removed the hiss.

use crate::Waveform;
use rustfft::{FftPlanner, num_complex::Complex};

/// Magnitude spectrum of a waveform over `[0, Nyquist]`.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// |X[k]| for k in 0..=len/2
    magnitudes: Vec<f64>,
    /// Width of one bin in Hz
    bin_hz: f64,
}

impl Spectrum {
    /// Computes the spectrum with a Hann window over the whole waveform.
    pub fn of(waveform: &Waveform) -> Self {
        let samples = waveform.samples();
        let len = samples.len();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(len);

        // Hann window - reduces spectral leakage
        let mut buffer: Vec<Complex<f64>> = samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let w = if len > 1 {
                    0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (len - 1) as f64).cos())
                } else {
                    1.0
                };
                Complex::new(s * w, 0.0)
            })
            .collect();
        fft.process(&mut buffer);

        let magnitudes = buffer[..=len / 2].iter().map(|c| c.norm()).collect();
        Self {
            magnitudes,
            bin_hz: waveform.sample_rate() as f64 / len as f64,
        }
    }

    pub fn bin_hz(&self) -> f64 {
        self.bin_hz
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Centre frequency of the strongest bin, ignoring DC.
    ///
    /// Returns 0.0 when the waveform is too short to have any non-DC bin or is
    /// silent.
    pub fn dominant_frequency(&self) -> f64 {
        self.magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, m)| **m > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k as f64 * self.bin_hz)
            .unwrap_or(0.0)
    }

    /// Sum of squared magnitudes of bins whose centre lies in `[lo_hz, hi_hz)`.
    pub fn band_energy(&self, lo_hz: f64, hi_hz: f64) -> f64 {
        self.magnitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| {
                let f = *k as f64 * self.bin_hz;
                f >= lo_hz && f < hi_hz
            })
            .map(|(_, m)| m * m)
            .sum()
    }
}

/// Frequency of the strongest non-DC component of `waveform`, in Hz.
pub fn dominant_frequency(waveform: &Waveform) -> f64 {
    Spectrum::of(waveform).dominant_frequency()
}
