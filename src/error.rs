use std::io;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A parameter or input waveform was rejected before any processing.
    InvalidArgument,
    /// The input could not be read or decoded.
    Source,
}

/// Errors produced while building or running the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Noise amplitude must be non-negative, got {amplitude}")]
    InvalidNoiseAmplitude { amplitude: f64 },
    #[error("Cutoff frequency must be positive, got {cutoff_hz} Hz")]
    NonPositiveCutoff { cutoff_hz: f64 },
    #[error("Cutoff frequency {cutoff_hz} Hz must be less than Nyquist frequency {nyquist_hz} Hz")]
    CutoffAboveNyquist { cutoff_hz: f64, nyquist_hz: f64 },
    #[error("Filter order must be at least 1, got {order}")]
    InvalidOrder { order: usize },
    #[error("Sample rate must be positive, got {sample_rate}")]
    InvalidSampleRate { sample_rate: u32 },
    #[error("Waveform has no samples")]
    EmptyWaveform,
    #[error("Sample {index} is not finite ({value})")]
    NonFiniteSample { index: usize, value: f64 },
    #[error("Invalid tone {name}: {value}")]
    InvalidTone { name: &'static str, value: f64 },
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Source(_) => ErrorKind::Source,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Failures while acquiring a waveform from a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "wav")]
    #[error("WAV decode failed: {0}")]
    Wav(#[from] hound::Error),
    #[error("Audio contains no samples")]
    Empty,
    #[error("Audio declares zero channels")]
    NoChannels,
    #[error("Invalid audio: {0}")]
    Invalid(String),
}
