//! Source → noise → design → filter orchestration.

use crate::{
    NoiseInjector, PipelineConfig, Result, SignalKind, SyntheticTone, Waveform, WaveformSource,
    ZeroPhaseFilter, butterworth_lowpass,
};
use rand::Rng;

/// Everything one pipeline run produces.
///
/// The three waveforms always share the source's length and sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub kind: SignalKind,
    pub original: Waveform,
    pub noisy: Waveform,
    pub filtered: Waveform,
}

impl PipelineResult {
    pub fn sample_rate(&self) -> u32 {
        self.original.sample_rate()
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// RMS of `noisy - original`: how much noise was added.
    pub fn noise_rms(&self) -> f64 {
        residual_rms(&self.noisy, &self.original)
    }

    /// RMS of `filtered - original`: how much error is left after filtering.
    pub fn residual_rms(&self) -> f64 {
        residual_rms(&self.filtered, &self.original)
    }
}

fn residual_rms(a: &Waveform, b: &Waveform) -> f64 {
    let sum_sq: f64 = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(x, y)| (x - y).powi(2))
        .sum();
    (sum_sq / a.len() as f64).sqrt()
}

/// Runs the add-noise-then-clean-it-up pipeline with a fixed policy.
///
/// A `Pipeline` holds only its configuration, so one instance can serve any
/// number of callers; each run takes its own random number generator.
///
/// # Examples
///
/// ```
/// use quietwave::{Pipeline, PipelineConfig, SignalKind};
/// use rand::SeedableRng;
///
/// let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let result = pipeline.run(None, &mut rng).unwrap();
/// assert_eq!(result.kind, SignalKind::Synthetic);
/// assert_eq!(result.filtered.len(), 44100);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline after checking the rate-independent parts of
    /// `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline on `source`, or on the synthetic tone when `None`.
    ///
    /// Decoded audio is peak-normalized before noise is added. Any failure
    /// aborts the run and no partial result is returned.
    pub fn run<R: Rng>(
        &self,
        source: Option<&mut dyn WaveformSource>,
        rng: &mut R,
    ) -> Result<PipelineResult> {
        let (kind, original) = match source {
            Some(source) => acquire(source)?,
            None => {
                let mut tone = SyntheticTone::new(self.config.tone)?;
                acquire(&mut tone)?
            }
        };
        log::debug!(
            "acquired {} waveform: {} samples at {} Hz",
            kind,
            original.len(),
            original.sample_rate()
        );

        self.process(kind, original, rng)
    }

    /// Runs the pipeline on the WAV file at `path`, falling back to the
    /// synthetic tone when no file exists there.
    #[cfg(feature = "wav")]
    pub fn run_path<P: AsRef<std::path::Path>, R: Rng>(
        &self,
        path: P,
        rng: &mut R,
    ) -> Result<PipelineResult> {
        let mut source = crate::source::source_for_path(path, &self.config.tone)?;
        let source: &mut dyn WaveformSource = source.as_mut();
        self.run(Some(source), rng)
    }

    /// Noise, design and filtering stages for an acquired waveform.
    fn process<R: Rng>(
        &self,
        kind: SignalKind,
        original: Waveform,
        rng: &mut R,
    ) -> Result<PipelineResult> {
        let injector = NoiseInjector::new(self.config.noise())?;
        // Validate the filter before spending time on noise
        let coeffs = butterworth_lowpass(&self.config.filter_spec(original.sample_rate()))?;

        let noisy = injector.apply(&original, rng);
        log::debug!("injected noise with std dev {}", injector.amplitude());

        let filtered = ZeroPhaseFilter::new(&coeffs).apply(&noisy);
        log::debug!(
            "filtered with order-{} low-pass at {} Hz",
            coeffs.order(),
            coeffs.spec().cutoff_hz
        );

        let result = PipelineResult {
            kind,
            original,
            noisy,
            filtered,
        };
        log::info!(
            "processed {} samples ({}): noise rms {:.4}, residual rms {:.4}",
            result.len(),
            result.kind,
            result.noise_rms(),
            result.residual_rms()
        );
        Ok(result)
    }
}

/// Reads from `source`, normalizing decoded audio to unit peak.
fn acquire(source: &mut dyn WaveformSource) -> Result<(SignalKind, Waveform)> {
    let kind = source.kind();
    let mut waveform = source.read()?;
    if kind == SignalKind::Audio {
        waveform.normalize_peak();
    }
    Ok((kind, waveform))
}
