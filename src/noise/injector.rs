//! Additive Gaussian noise for whole waveforms.

use super::GaussianNoise;
use crate::{Error, Result, Signal, Waveform};
use rand::Rng;

/// Noise settings.
///
/// `amplitude` is the *standard deviation* of the injected noise, not a peak
/// level: roughly a third of the samples will deviate by more than it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseConfig {
    pub amplitude: f64,
}

impl NoiseConfig {
    pub fn new(amplitude: f64) -> Self {
        Self { amplitude }
    }

    /// Checks that the amplitude is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(Error::InvalidNoiseAmplitude {
                amplitude: self.amplitude,
            });
        }
        Ok(())
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { amplitude: 0.3 }
    }
}

/// Adds independent zero-mean Gaussian noise to every sample of a waveform.
///
/// # Examples
///
/// ```
/// use quietwave::{NoiseConfig, NoiseInjector, Waveform};
/// use rand::SeedableRng;
///
/// let wave = Waveform::new(vec![0.0; 128], 8000).unwrap();
/// let injector = NoiseInjector::new(NoiseConfig::new(0.1)).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let noisy = injector.apply(&wave, &mut rng);
/// assert_eq!(noisy.len(), wave.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NoiseInjector {
    config: NoiseConfig,
}

impl NoiseInjector {
    /// Creates an injector, rejecting negative or non-finite amplitudes.
    pub fn new(config: NoiseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn amplitude(&self) -> f64 {
        self.config.amplitude
    }

    /// Returns a noisy copy of `waveform` with the same length and sample rate.
    ///
    /// With a zero amplitude the samples come back unchanged and the generator
    /// is not touched.
    ///
    /// # Arguments
    ///
    /// * `waveform` - Clean input
    /// * `rng` - Source of randomness; seed it for reproducible output
    ///
    /// # Returns
    ///
    /// `waveform` plus zero-mean Gaussian noise with standard deviation
    /// [`NoiseInjector::amplitude`].
    pub fn apply<R: Rng>(&self, waveform: &Waveform, rng: &mut R) -> Waveform {
        if self.config.amplitude == 0.0 {
            return waveform.clone();
        }
        let mut noise = GaussianNoise::new(rng, self.config.amplitude);
        let samples = waveform
            .samples()
            .iter()
            .map(|&s| s + noise.next_sample())
            .collect();
        Waveform::from_parts(samples, waveform.sample_rate())
    }
}

/// Validates `amplitude` and adds noise to `waveform` in one step.
pub fn add_noise<R: Rng>(waveform: &Waveform, amplitude: f64, rng: &mut R) -> Result<Waveform> {
    let injector = NoiseInjector::new(NoiseConfig::new(amplitude))?;
    Ok(injector.apply(waveform, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ramp(len: usize) -> Waveform {
        let samples = (0..len).map(|i| i as f64 / len as f64).collect();
        Waveform::new(samples, 1000).unwrap()
    }

    #[test]
    fn test_negative_amplitude_rejected() {
        let err = NoiseInjector::new(NoiseConfig::new(-0.1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("-0.1"));
    }

    #[test]
    fn test_non_finite_amplitude_rejected() {
        assert!(NoiseInjector::new(NoiseConfig::new(f64::NAN)).is_err());
        assert!(NoiseInjector::new(NoiseConfig::new(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_add_noise_rejects_before_touching_rng() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = add_noise(&ramp(4), -1.0, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidNoiseAmplitude { amplitude } if amplitude == -1.0));
    }

    #[test]
    fn test_zero_amplitude_is_identity() {
        let wave = ramp(100);
        let mut rng = StdRng::seed_from_u64(0);
        let noisy = add_noise(&wave, 0.0, &mut rng).unwrap();
        assert_eq!(noisy, wave);
    }

    #[test]
    fn test_preserves_length_and_rate() {
        let wave = ramp(333);
        let mut rng = StdRng::seed_from_u64(11);
        let noisy = add_noise(&wave, 0.3, &mut rng).unwrap();
        assert_eq!(noisy.len(), 333);
        assert_eq!(noisy.sample_rate(), 1000);
        assert_ne!(noisy, wave);
    }

    #[test]
    fn test_seeded_runs_match() {
        let wave = ramp(500);
        let injector = NoiseInjector::new(NoiseConfig::new(0.3)).unwrap();
        let a = injector.apply(&wave, &mut StdRng::seed_from_u64(42));
        let b = injector.apply(&wave, &mut StdRng::seed_from_u64(42));
        let c = injector.apply(&wave, &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_residual_has_requested_spread() {
        let wave = Waveform::new(vec![0.5; 50_000], 44100).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let noisy = add_noise(&wave, 0.2, &mut rng).unwrap();
        let residual: Vec<f64> = noisy.samples().iter().map(|s| s - 0.5).collect();
        let n = residual.len() as f64;
        let mean = residual.iter().sum::<f64>() / n;
        let std_dev = (residual.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n).sqrt();
        assert!(mean.abs() < 0.01);
        assert!((std_dev - 0.2).abs() < 0.01);
    }
}
