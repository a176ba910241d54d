//! Pipeline policy values.

use crate::{Error, FilterSpec, NoiseConfig, Result, ToneConfig};

/// Fixed policy the pipeline runs with.
///
/// Defaults: noise standard deviation 0.3, 3000 Hz cutoff, order-5 filter,
/// and a 440 Hz / 44.1 kHz / one-second fallback tone.
///
/// # Examples
///
/// ```
/// use quietwave::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_cutoff_hz(1500.0)
///     .with_order(4);
/// assert_eq!(config.noise_amplitude, 0.3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Standard deviation of the injected noise
    pub noise_amplitude: f64,
    pub cutoff_hz: f64,
    pub order: usize,
    /// Tone synthesized when no source is given
    pub tone: ToneConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            noise_amplitude: NoiseConfig::default().amplitude,
            cutoff_hz: 3000.0,
            order: 5,
            tone: ToneConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_noise_amplitude(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    pub fn with_cutoff_hz(mut self, cutoff_hz: f64) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_tone(mut self, tone: ToneConfig) -> Self {
        self.tone = tone;
        self
    }

    pub fn noise(&self) -> NoiseConfig {
        NoiseConfig::new(self.noise_amplitude)
    }

    /// Filter spec for a waveform sampled at `sample_rate`.
    pub fn filter_spec(&self, sample_rate: u32) -> FilterSpec {
        FilterSpec::new(self.cutoff_hz, sample_rate, self.order)
    }

    /// Checks everything that does not depend on the input's sample rate.
    ///
    /// The cutoff-vs-Nyquist check needs the actual rate and happens when the
    /// filter is designed.
    pub fn validate(&self) -> Result<()> {
        self.noise().validate()?;
        if self.cutoff_hz.is_nan() || self.cutoff_hz <= 0.0 {
            return Err(Error::NonPositiveCutoff {
                cutoff_hz: self.cutoff_hz,
            });
        }
        if self.order == 0 {
            return Err(Error::InvalidOrder { order: self.order });
        }
        self.tone.validate()
    }
}
