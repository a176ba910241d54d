//! Butterworth low-pass design.
//!
//! The design follows the classic route: take the analog Butterworth
//! prototype, pre-warp the cutoff so it lands exactly where requested after
//! the bilinear transform, then map each conjugate pole pair (and the lone
//! real pole of an odd order) to its own digital section.
//!
//! For order `n`, pole pair `k` has quality factor
//! `Q_k = 1 / (2 sin((2k + 1)π / 2n))`. With `K = tan(π fc / fs)` the
//! bilinear transform of `1 / (s² + s/Q + 1)` gives
//!
//! ```text
//!        K²            (1 + 2z⁻¹ + z⁻²)
//! H(z) = ---------------------------------------------------------------
//!        (1 + K/Q + K²) + 2(K² - 1) z⁻¹ + (1 - K/Q + K²) z⁻²
//! ```
//!
//! and the first-order section `1 / (s + 1)` becomes
//! `K (1 + z⁻¹) / ((1 + K) + (K - 1) z⁻¹)`.
//!
//! Every section has unity gain at DC and its poles inside the unit circle
//! for any `0 < fc < fs / 2`.

use super::biquad::SecondOrderSection;
use crate::{Error, Result};
use std::f64::consts::PI;

/// What to design: cutoff, sample rate and order of a low-pass filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterSpec {
    /// -3 dB point of a single pass, in Hz
    pub cutoff_hz: f64,
    pub sample_rate: u32,
    pub order: usize,
}

impl FilterSpec {
    /// Creates a filter specification. Nothing is checked until
    /// [`FilterSpec::validate`] or [`butterworth_lowpass`] runs.
    ///
    /// # Arguments
    ///
    /// * `cutoff_hz` - Cutoff frequency in Hz, below Nyquist
    /// * `sample_rate` - Sample rate of the signal to be filtered
    /// * `order` - Filter order, at least 1
    pub fn new(cutoff_hz: f64, sample_rate: u32, order: usize) -> Self {
        Self {
            cutoff_hz,
            sample_rate,
            order,
        }
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Cutoff as a fraction of Nyquist, in `(0, 1)` for a valid spec.
    pub fn normalized_cutoff(&self) -> f64 {
        self.cutoff_hz / self.nyquist()
    }

    /// Checks, in order: positive cutoff, cutoff below Nyquist, order ≥ 1.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }
        if self.cutoff_hz.is_nan() || self.cutoff_hz <= 0.0 {
            return Err(Error::NonPositiveCutoff {
                cutoff_hz: self.cutoff_hz,
            });
        }
        let nyquist_hz = self.nyquist();
        if self.cutoff_hz >= nyquist_hz {
            return Err(Error::CutoffAboveNyquist {
                cutoff_hz: self.cutoff_hz,
                nyquist_hz,
            });
        }
        if self.order == 0 {
            return Err(Error::InvalidOrder { order: self.order });
        }
        Ok(())
    }
}

/// A designed low-pass filter, stored as a cascade of sections.
///
/// The cascade is what gets applied; [`b`](Self::b) and [`a`](Self::a) give
/// the equivalent single transfer function with `order + 1` coefficients each.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    spec: FilterSpec,
    sections: Vec<SecondOrderSection>,
}

impl FilterCoefficients {
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn order(&self) -> usize {
        self.spec.order
    }

    pub fn sections(&self) -> &[SecondOrderSection] {
        &self.sections
    }

    /// Feed-forward coefficients of the expanded transfer function.
    pub fn b(&self) -> Vec<f64> {
        self.sections
            .iter()
            .fold(vec![1.0], |acc, s| convolve(&acc, &s.numerator()))
    }

    /// Feedback coefficients of the expanded transfer function (`a[0] == 1`).
    pub fn a(&self) -> Vec<f64> {
        self.sections
            .iter()
            .fold(vec![1.0], |acc, s| convolve(&acc, &s.denominator()))
    }

    /// Single-pass magnitude response at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / self.spec.sample_rate as f64;
        self.sections.iter().map(|s| s.magnitude_at(omega)).product()
    }

    /// Largest pole magnitude across all sections.
    pub fn max_pole_radius(&self) -> f64 {
        self.sections
            .iter()
            .map(SecondOrderSection::pole_radius)
            .fold(0.0, f64::max)
    }
}

/// Designs a Butterworth low-pass filter for `spec`.
///
/// # Errors
///
/// Returns an `InvalidArgument` error when the cutoff is not positive, is at
/// or above Nyquist, or the order is zero.
///
/// # Examples
///
/// ```
/// use quietwave::{FilterSpec, butterworth_lowpass};
///
/// let coeffs = butterworth_lowpass(&FilterSpec::new(3000.0, 44100, 5)).unwrap();
/// assert_eq!(coeffs.b().len(), 6);
/// assert_eq!(coeffs.a().len(), 6);
/// ```
pub fn butterworth_lowpass(spec: &FilterSpec) -> Result<FilterCoefficients> {
    spec.validate()?;

    let n = spec.order;
    // Pre-warped analog cutoff
    let k = (PI * spec.cutoff_hz / spec.sample_rate as f64).tan();
    let k2 = k * k;

    let mut sections = Vec::with_capacity(n.div_ceil(2));
    for pair in 0..n / 2 {
        let q = 1.0 / (2.0 * ((2 * pair + 1) as f64 * PI / (2 * n) as f64).sin());
        let b0 = k2;
        sections.push(SecondOrderSection::new(
            [b0, 2.0 * b0, b0],
            [1.0 + k / q + k2, 2.0 * (k2 - 1.0), 1.0 - k / q + k2],
        ));
    }
    if n % 2 == 1 {
        sections.push(SecondOrderSection::new([k, k, 0.0], [1.0 + k, k - 1.0, 0.0]));
    }

    log::debug!(
        "designed order-{} Butterworth low-pass at {} Hz ({} sections)",
        n,
        spec.cutoff_hz,
        sections.len()
    );

    Ok(FilterCoefficients {
        spec: *spec,
        sections,
    })
}

/// Polynomial product.
fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn design(cutoff_hz: f64, sample_rate: u32, order: usize) -> FilterCoefficients {
        butterworth_lowpass(&FilterSpec::new(cutoff_hz, sample_rate, order)).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_cutoff() {
        for cutoff in [0.0, -100.0, f64::NAN] {
            let err = butterworth_lowpass(&FilterSpec::new(cutoff, 44100, 5)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
            assert!(matches!(err, Error::NonPositiveCutoff { .. }));
        }
    }

    #[test]
    fn test_rejects_cutoff_at_or_above_nyquist() {
        for cutoff in [22050.0, 30000.0] {
            let err = butterworth_lowpass(&FilterSpec::new(cutoff, 44100, 5)).unwrap_err();
            match err {
                Error::CutoffAboveNyquist {
                    cutoff_hz,
                    nyquist_hz,
                } => {
                    assert_eq!(cutoff_hz, cutoff);
                    assert_eq!(nyquist_hz, 22050.0);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_cutoff_checked_before_order() {
        let err = butterworth_lowpass(&FilterSpec::new(-1.0, 44100, 0)).unwrap_err();
        assert!(matches!(err, Error::NonPositiveCutoff { .. }));
    }

    #[test]
    fn test_rejects_zero_order() {
        let err = butterworth_lowpass(&FilterSpec::new(1000.0, 44100, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidOrder { order: 0 }));
    }

    #[test]
    fn test_coefficient_counts() {
        for order in 1..=10 {
            let coeffs = design(1000.0, 44100, order);
            assert_eq!(coeffs.b().len(), order + 1);
            assert_eq!(coeffs.a().len(), order + 1);
            assert_eq!(coeffs.sections().len(), order.div_ceil(2));
            assert_eq!(coeffs.a()[0], 1.0);
        }
    }

    #[test]
    fn test_unity_dc_gain() {
        for order in 1..=8 {
            let coeffs = design(3000.0, 44100, order);
            let dc = coeffs.b().iter().sum::<f64>() / coeffs.a().iter().sum::<f64>();
            assert!((dc - 1.0).abs() < 1e-9, "order {order}: dc gain {dc}");
            assert!((coeffs.magnitude_at(0.0) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_half_power_at_cutoff() {
        for order in [1, 2, 5, 8] {
            let coeffs = design(1000.0, 44100, order);
            let mag = coeffs.magnitude_at(1000.0);
            assert!(
                (mag - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9,
                "order {order}: |H(fc)| = {mag}"
            );
        }
    }

    #[test]
    fn test_poles_inside_unit_circle() {
        for &(cutoff, rate) in &[(1.0, 44100), (3000.0, 44100), (21000.0, 44100), (100.0, 8000)] {
            for order in 1..=12 {
                let radius = design(cutoff, rate, order).max_pole_radius();
                assert!(radius < 1.0, "cutoff {cutoff} order {order}: radius {radius}");
            }
        }
    }

    #[test]
    fn test_second_order_matches_reference() {
        // Order 2 at a quarter of the sample rate: K = 1, Q = 1/sqrt(2)
        let coeffs = design(11025.0, 44100, 2);
        let b = coeffs.b();
        let a = coeffs.a();
        let norm = 2.0 + std::f64::consts::SQRT_2;
        assert!((b[0] - 1.0 / norm).abs() < 1e-12);
        assert!((b[1] - 2.0 / norm).abs() < 1e-12);
        assert!(a[1].abs() < 1e-12);
        assert!((a[2] - (2.0 - std::f64::consts::SQRT_2) / norm).abs() < 1e-12);
    }

    #[test]
    fn test_steeper_with_higher_order() {
        let low = design(1000.0, 44100, 2).magnitude_at(4000.0);
        let high = design(1000.0, 44100, 6).magnitude_at(4000.0);
        assert!(high < low);
    }

    #[test]
    fn test_design_is_deterministic() {
        assert_eq!(design(3000.0, 44100, 5), design(3000.0, 44100, 5));
    }

    #[test]
    fn test_convolve() {
        assert_eq!(convolve(&[1.0, 1.0], &[1.0, 1.0]), vec![1.0, 2.0, 1.0]);
    }
}
