//! Core signal trait.
//!
//! This module provides the fundamental `Signal` trait that represents
//! any generator that can produce samples one at a time: the synthetic test
//! tone and the Gaussian noise source both implement it.

/// Common interface for all sample generators.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch generation via `process()`
pub trait Signal {
    /// Generates the next sample from the signal.
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Collects the next `len` samples into a new vector.
    fn take_samples(&mut self, len: usize) -> Vec<f64> {
        let mut buffer = vec![0.0; len];
        self.process(&mut buffer);
        buffer
    }
}

/// A signal that knows the sample rate it is generated at.
pub trait AudioSignal: Signal {
    /// Sample rate in Hz (e.g., 44100 for CD quality).
    fn sample_rate(&self) -> u32;
}
