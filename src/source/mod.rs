//! Waveform sources: where the pipeline's input comes from.
//!
//! A source hands over one mono [`Waveform`]. Channel down-mixing and file
//! decoding happen here, before the pipeline sees any samples.

mod synthetic;
#[cfg(feature = "wav")]
mod wav;

pub use synthetic::{SyntheticTone, ToneConfig};
#[cfg(feature = "wav")]
pub use wav::WavFileSource;

use crate::{SourceError, Waveform};
use std::fmt;

/// What kind of signal a waveform came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SignalKind {
    /// Decoded from an audio file
    Audio,
    /// Generated test tone
    Synthetic,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Audio => "audio",
            SignalKind::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can supply a mono waveform to the pipeline.
pub trait WaveformSource {
    /// The kind of signal this source produces.
    fn kind(&self) -> SignalKind;

    /// Produces the waveform. Multi-channel material must already be averaged
    /// down to one channel.
    fn read(&mut self) -> Result<Waveform, SourceError>;
}

/// Picks the pipeline input for `path`: the WAV file when one exists there,
/// otherwise a synthetic tone built from `tone`.
///
/// # Arguments
///
/// * `path` - Candidate WAV file
/// * `tone` - Parameters for the fallback tone
///
/// # Returns
///
/// A boxed source, or an error if the fallback tone parameters are invalid.
#[cfg(feature = "wav")]
pub fn source_for_path<P: AsRef<std::path::Path>>(
    path: P,
    tone: &ToneConfig,
) -> crate::Result<Box<dyn WaveformSource>> {
    let path = path.as_ref();
    if path.exists() {
        Ok(Box::new(WavFileSource::new(path)))
    } else {
        log::info!("{} not found, using synthetic tone", path.display());
        Ok(Box::new(SyntheticTone::new(*tone)?))
    }
}

/// Wraps a waveform validation failure as a source failure.
pub(crate) fn invalid(err: crate::Error) -> SourceError {
    SourceError::Invalid(err.to_string())
}
