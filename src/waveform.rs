//! Mono sample buffers and the operations the pipeline performs on them.

use crate::{Error, Result};

/// A mono waveform: samples in time order plus the rate they were taken at.
///
/// A `Waveform` always holds at least one sample and every sample is finite.
/// Both are checked on construction, so downstream stages never see empty or
/// NaN-laden buffers.
///
/// # Examples
///
/// ```
/// use quietwave::Waveform;
///
/// let wave = Waveform::new(vec![0.0, 0.5, -0.25], 8000).unwrap();
/// assert_eq!(wave.len(), 3);
/// assert_eq!(wave.sample_rate(), 8000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Waveform {
    /// Creates a waveform, validating the sample rate and every sample.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate { sample_rate });
        }
        if samples.is_empty() {
            return Err(Error::EmptyWaveform);
        }
        if let Some((index, &value)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(Error::NonFiniteSample { index, value });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Builds a waveform from a buffer derived from an already valid one.
    ///
    /// Stages that map finite samples through finite arithmetic use this to
    /// skip revalidation.
    pub(crate) fn from_parts(samples: Vec<f64>, sample_rate: u32) -> Self {
        debug_assert!(!samples.is_empty());
        debug_assert!(sample_rate > 0);
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()))
    }

    /// Root-mean-square level.
    pub fn rms(&self) -> f64 {
        let sum_sq: f64 = self.samples.iter().map(|s| s * s).sum();
        (sum_sq / self.samples.len() as f64).sqrt()
    }

    /// Time of each sample in seconds: `t[i] = i / sample_rate`.
    ///
    /// The axis is half-open, so the final point is one sample period short of
    /// [`duration`](Self::duration).
    pub fn time_axis(&self) -> Vec<f64> {
        let rate = self.sample_rate as f64;
        (0..self.samples.len()).map(|i| i as f64 / rate).collect()
    }

    /// Scales the waveform so its peak magnitude is exactly 1.0.
    ///
    /// Silence (all zeros) is left untouched.
    pub fn normalize_peak(&mut self) {
        let max_abs = self.peak();
        if max_abs > 0.0 {
            for sample in self.samples.iter_mut() {
                *sample /= max_abs;
            }
        }
    }

    /// Consuming form of [`normalize_peak`](Self::normalize_peak).
    pub fn normalized(mut self) -> Self {
        self.normalize_peak();
        self
    }
}

/// Averages interleaved frames into a single channel.
///
/// `interleaved` holds `channels` samples per frame. A trailing partial frame
/// is ignored. With one channel the samples are returned as-is.
pub fn downmix(interleaved: &[f64], channels: usize) -> Vec<f64> {
    match channels {
        0 => Vec::new(),
        1 => interleaved.to_vec(),
        n => interleaved
            .chunks_exact(n)
            .map(|frame| frame.iter().sum::<f64>() / n as f64)
            .collect(),
    }
}
