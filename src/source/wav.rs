//! WAV file decoding.

use super::{SignalKind, WaveformSource, invalid};
use crate::waveform::downmix;
use crate::{SourceError, Waveform};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads a WAV file and averages its channels into one.
///
/// Integer samples are scaled into `[-1, 1)` by `2^(bits - 1)`; float samples
/// are taken as stored. Peak normalization is left to the pipeline.
#[derive(Debug, Clone)]
pub struct WavFileSource {
    path: PathBuf,
}

impl WavFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WaveformSource for WavFileSource {
    fn kind(&self) -> SignalKind {
        SignalKind::Audio
    }

    fn read(&mut self) -> Result<Waveform, SourceError> {
        let reader = hound::WavReader::open(&self.path)?;
        log::debug!("decoding {}", self.path.display());
        decode(reader)
    }
}

/// Decodes every sample from `reader` into a mono waveform.
pub(crate) fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Result<Waveform, SourceError> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(SourceError::NoChannels);
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_value))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels as usize;
    if interleaved.len() % channels != 0 {
        log::warn!(
            "dropping {} samples of a trailing partial frame",
            interleaved.len() % channels
        );
    }
    let mono = downmix(&interleaved, channels);
    if mono.is_empty() {
        return Err(SourceError::Empty);
    }

    log::debug!(
        "decoded {} frames x {} channels at {} Hz",
        mono.len(),
        channels,
        spec.sample_rate
    );
    Waveform::new(mono, spec.sample_rate).map_err(invalid)
}
