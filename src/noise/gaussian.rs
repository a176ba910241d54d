//! White Gaussian noise generator.

use crate::Signal;
use rand::Rng;
use std::f64::consts::PI;

/// A zero-mean white Gaussian noise generator.
///
/// Each sample is drawn independently from `N(0, std_dev²)` using the
/// Box-Muller transform over the supplied random number generator. Samples
/// are produced in pairs; the second of each pair is held for the next call.
///
/// The generator is borrowed, never global, so seeding it makes the noise
/// reproducible.
///
/// # Examples
///
/// ```
/// use quietwave::{GaussianNoise, Signal};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let mut noise = GaussianNoise::new(&mut rng, 0.3);
/// let sample = noise.next_sample();
/// assert!(sample.is_finite());
/// ```
pub struct GaussianNoise<'a, R: Rng> {
    rng: &'a mut R,
    std_dev: f64,
    /// Second variate of the last Box-Muller pair
    spare: Option<f64>,
}

impl<'a, R: Rng> GaussianNoise<'a, R> {
    /// Creates a noise source with the given standard deviation.
    pub fn new(rng: &'a mut R, std_dev: f64) -> Self {
        Self {
            rng,
            std_dev,
            spare: None,
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draws one standard normal variate.
    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // u1 in (0, 1] keeps ln() finite
        let u1: f64 = 1.0 - self.rng.gen_range(0.0..1.0);
        let u2: f64 = self.rng.gen_range(0.0..1.0);
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        self.spare = Some(radius * theta.sin());
        radius * theta.cos()
    }
}

impl<R: Rng> Signal for GaussianNoise<'_, R> {
    fn next_sample(&mut self) -> f64 {
        self.std_dev * self.standard_normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stats(samples: &[f64]) -> (f64, f64) {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn test_mean_and_std_dev() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut noise = GaussianNoise::new(&mut rng, 0.3);
        let samples = noise.take_samples(100_000);
        let (mean, std_dev) = stats(&samples);
        assert!(mean.abs() < 0.01, "mean = {mean}");
        assert!((std_dev - 0.3).abs() < 0.01, "std_dev = {std_dev}");
    }

    #[test]
    fn test_all_finite() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut noise = GaussianNoise::new(&mut rng, 1.0);
        assert!(noise.take_samples(10_000).iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_zero_std_dev_is_silent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut noise = GaussianNoise::new(&mut rng, 0.0);
        assert!(noise.take_samples(64).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = GaussianNoise::new(&mut rng_a, 0.5).take_samples(257);
        let b = GaussianNoise::new(&mut rng_b, 0.5).take_samples(257);
        assert_eq!(a, b);
    }

    #[test]
    fn test_randomness() {
        let mut rng = StdRng::seed_from_u64(5);
        let samples = GaussianNoise::new(&mut rng, 1.0).take_samples(100);
        let first = samples[0];
        assert!(!samples.iter().all(|&s| s == first));
    }
}
