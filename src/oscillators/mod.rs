//! Oscillators used to synthesize test tones.

mod sine;

pub use sine::SineOscillator;
