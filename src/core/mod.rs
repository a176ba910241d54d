//! Core signal generation traits.
//!
//! - `Signal` for anything that produces samples one at a time
//! - `AudioSignal` for signals that carry their sample rate

mod signal;

pub use signal::{AudioSignal, Signal};
