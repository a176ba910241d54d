//! Second-order IIR sections and their running state.
//!
//! A designed filter is stored as a cascade of these sections rather than one
//! high-order polynomial; each section only has to stay stable on its own,
//! which keeps high orders well-conditioned.

/// Normalized biquad coefficients (`a0 == 1`).
///
/// Difference equation (Direct Form I):
/// `y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]`
///
/// A first-order section is a biquad with `b2 == a2 == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderSection {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl SecondOrderSection {
    /// Builds a section from raw coefficients, normalizing by `a0`.
    pub fn new(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Self {
            b0: b[0] / a0,
            b1: b[1] / a0,
            b2: b[2] / a0,
            a1: a[1] / a0,
            a2: a[2] / a0,
        }
    }

    /// Returns true if this section has only one pole.
    pub fn is_first_order(&self) -> bool {
        self.b2 == 0.0 && self.a2 == 0.0
    }

    /// Feed-forward polynomial, highest power of `z^-1` last.
    pub(crate) fn numerator(&self) -> Vec<f64> {
        if self.is_first_order() {
            vec![self.b0, self.b1]
        } else {
            vec![self.b0, self.b1, self.b2]
        }
    }

    /// Feedback polynomial, leading `1.0` included.
    pub(crate) fn denominator(&self) -> Vec<f64> {
        if self.is_first_order() {
            vec![1.0, self.a1]
        } else {
            vec![1.0, self.a1, self.a2]
        }
    }

    /// Gain at 0 Hz.
    pub fn dc_gain(&self) -> f64 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }

    /// Magnitude response at `omega` radians per sample.
    pub fn magnitude_at(&self, omega: f64) -> f64 {
        let (num_re, num_im) = eval_polynomial(&[self.b0, self.b1, self.b2], omega);
        let (den_re, den_im) = eval_polynomial(&[1.0, self.a1, self.a2], omega);
        ((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)).sqrt()
    }

    /// Largest pole magnitude; the section is stable when this is below 1.
    pub fn pole_radius(&self) -> f64 {
        // Poles are the roots of z^2 + a1*z + a2
        let disc = self.a1 * self.a1 - 4.0 * self.a2;
        if disc < 0.0 {
            // Complex conjugate pair: |p|^2 = a2
            self.a2.sqrt()
        } else {
            let root = disc.sqrt();
            let p1 = (-self.a1 + root) / 2.0;
            let p2 = (-self.a1 - root) / 2.0;
            p1.abs().max(p2.abs())
        }
    }
}

/// Evaluates `sum(c[k] * e^{-j*omega*k})` as `(re, im)`.
fn eval_polynomial(coeffs: &[f64], omega: f64) -> (f64, f64) {
    coeffs
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (k, &c)| {
            let angle = omega * k as f64;
            (re + c * angle.cos(), im - c * angle.sin())
        })
}

/// Direct Form I state for one section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    x1: f64, // Input at t-1
    x2: f64, // Input at t-2
    y1: f64, // Output at t-1
    y2: f64, // Output at t-2
}

impl BiquadState {
    /// State the section would settle into after an endless constant `input`.
    ///
    /// Starting from here, a constant input produces no start-up transient.
    pub fn steady(section: &SecondOrderSection, input: f64) -> Self {
        let output = section.dc_gain() * input;
        Self {
            x1: input,
            x2: input,
            y1: output,
            y2: output,
        }
    }

    /// Filters one sample.
    ///
    /// # Arguments
    ///
    /// * `s` - Section coefficients, normalized so `a0 == 1`
    /// * `x0` - The next input sample
    ///
    /// # Returns
    ///
    /// The section's output for `x0`. The state shifts by one sample.
    #[inline]
    pub fn run(&mut self, s: &SecondOrderSection, x0: f64) -> f64 {
        let y0 = s.b0 * x0 + s.b1 * self.x1 + s.b2 * self.x2 - s.a1 * self.y1 - s.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x0;
        self.y2 = self.y1;
        self.y1 = y0;

        y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn averager() -> SecondOrderSection {
        // y[n] = (x[n] + x[n-1]) / 2
        SecondOrderSection::new([0.5, 0.5, 0.0], [1.0, 0.0, 0.0])
    }

    #[test]
    fn test_normalizes_by_a0() {
        let s = SecondOrderSection::new([2.0, 4.0, 2.0], [2.0, 1.0, 0.5]);
        assert_eq!(s.b0, 1.0);
        assert_eq!(s.b1, 2.0);
        assert_eq!(s.a1, 0.5);
        assert_eq!(s.a2, 0.25);
    }

    #[test]
    fn test_first_order_detection() {
        assert!(averager().is_first_order());
        let s = SecondOrderSection::new([1.0, 2.0, 1.0], [1.0, 0.1, 0.2]);
        assert!(!s.is_first_order());
        assert_eq!(s.numerator().len(), 3);
        assert_eq!(averager().denominator(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_run_difference_equation() {
        let s = averager();
        let mut state = BiquadState::default();
        assert_eq!(state.run(&s, 1.0), 0.5);
        assert_eq!(state.run(&s, 1.0), 1.0);
        assert_eq!(state.run(&s, 0.0), 0.5);
    }

    #[test]
    fn test_magnitude_response() {
        let s = averager();
        assert!((s.magnitude_at(0.0) - 1.0).abs() < 1e-12);
        assert!(s.magnitude_at(PI).abs() < 1e-12);
        assert!((s.dc_gain() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pole_radius() {
        // Complex pair with |p| = 0.9
        let s = SecondOrderSection::new([1.0, 0.0, 0.0], [1.0, 0.0, 0.81]);
        assert!((s.pole_radius() - 0.9).abs() < 1e-12);
        // Real poles at 0.5 and -0.2: z^2 - 0.3z - 0.1
        let s = SecondOrderSection::new([1.0, 0.0, 0.0], [1.0, -0.3, -0.1]);
        assert!((s.pole_radius() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_steady_state_has_no_transient() {
        let s = SecondOrderSection::new([0.2, 0.4, 0.2], [1.0, -0.5, 0.3]);
        let mut state = BiquadState::steady(&s, 0.7);
        let expected = s.dc_gain() * 0.7;
        for _ in 0..50 {
            assert!((state.run(&s, 0.7) - expected).abs() < 1e-12);
        }
    }
}
