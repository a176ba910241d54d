//! Synthetic test tone, used when no audio is supplied.

use super::{SignalKind, WaveformSource, invalid};
use crate::{AudioSignal, Error, Result, Signal, SineOscillator, SourceError, Waveform};

/// Parameters of the synthetic fallback tone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToneConfig {
    /// Tone frequency in Hz
    pub frequency: f64,
    pub sample_rate: u32,
    /// Length in seconds
    pub duration: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency: 440.0,
            sample_rate: 44100,
            duration: 1.0,
        }
    }
}

impl ToneConfig {
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Number of samples the tone will have: `floor(sample_rate * duration)`.
    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(Error::InvalidTone {
                name: "frequency",
                value: self.frequency,
            });
        }
        if !self.duration.is_finite() || self.sample_count() == 0 {
            return Err(Error::InvalidTone {
                name: "duration",
                value: self.duration,
            });
        }
        Ok(())
    }
}

/// A pure sine tone source.
///
/// # Examples
///
/// ```
/// use quietwave::{SyntheticTone, ToneConfig, WaveformSource};
///
/// let mut tone = SyntheticTone::new(ToneConfig::default()).unwrap();
/// let wave = tone.read().unwrap();
/// assert_eq!(wave.len(), 44100);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticTone {
    config: ToneConfig,
}

impl SyntheticTone {
    pub fn new(config: ToneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ToneConfig {
        &self.config
    }
}

impl WaveformSource for SyntheticTone {
    fn kind(&self) -> SignalKind {
        SignalKind::Synthetic
    }

    fn read(&mut self) -> std::result::Result<Waveform, SourceError> {
        let mut osc = SineOscillator::new(self.config.frequency, self.config.sample_rate);
        let samples = osc.take_samples(self.config.sample_count());
        Waveform::new(samples, osc.sample_rate()).map_err(invalid)
    }
}
