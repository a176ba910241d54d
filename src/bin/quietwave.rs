//! quietwave - add noise to audio, filter it back out, report what happened.
//!
//! Usage: quietwave [--seed N] [--noise STD_DEV] [--cutoff HZ] [--order N] [PATH]
//!
//! PATH is a WAV file; when it is missing or does not exist a 440 Hz test tone
//! is used instead. The summary is printed to stdout as JSON. Set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) to see each pipeline stage.

use anyhow::{Context, Result, bail};
use quietwave::analysis::Spectrum;
use quietwave::{Pipeline, PipelineConfig, PipelineResult, SignalKind, Waveform};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    path: Option<PathBuf>,
    config: PipelineConfig,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .with_context(|| format!("{name} expects a value"))
        };
        match arg.as_str() {
            "--seed" => args.seed = Some(value("--seed")?.parse().context("invalid --seed")?),
            "--noise" => {
                let amplitude = value("--noise")?.parse().context("invalid --noise")?;
                args.config = args.config.with_noise_amplitude(amplitude);
            }
            "--cutoff" => {
                let cutoff = value("--cutoff")?.parse().context("invalid --cutoff")?;
                args.config = args.config.with_cutoff_hz(cutoff);
            }
            "--order" => {
                let order = value("--order")?.parse().context("invalid --order")?;
                args.config = args.config.with_order(order);
            }
            "-h" | "--help" => {
                println!(
                    "usage: quietwave [--seed N] [--noise STD_DEV] [--cutoff HZ] [--order N] [PATH]"
                );
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path => {
                if args.path.is_some() {
                    bail!("only one input path may be given");
                }
                args.path = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

#[derive(Serialize)]
struct WaveSummary {
    rms: f64,
    peak: f64,
    dominant_hz: f64,
}

impl WaveSummary {
    fn of(wave: &Waveform) -> Self {
        Self {
            rms: wave.rms(),
            peak: wave.peak(),
            dominant_hz: Spectrum::of(wave).dominant_frequency(),
        }
    }
}

#[derive(Serialize)]
struct Report {
    kind: SignalKind,
    sample_rate: u32,
    samples: usize,
    duration_secs: f64,
    config: PipelineConfig,
    original: WaveSummary,
    noisy: WaveSummary,
    filtered: WaveSummary,
    noise_rms: f64,
    residual_rms: f64,
}

impl Report {
    fn new(result: &PipelineResult, config: PipelineConfig) -> Self {
        Self {
            kind: result.kind,
            sample_rate: result.sample_rate(),
            samples: result.len(),
            duration_secs: result.original.duration(),
            config,
            original: WaveSummary::of(&result.original),
            noisy: WaveSummary::of(&result.noisy),
            filtered: WaveSummary::of(&result.filtered),
            noise_rms: result.noise_rms(),
            residual_rms: result.residual_rms(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let pipeline = Pipeline::new(args.config)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = match &args.path {
        Some(path) => pipeline
            .run_path(path, &mut rng)
            .with_context(|| format!("failed to process {}", path.display()))?,
        None => pipeline.run(None, &mut rng)?,
    };

    let report = Report::new(&result, *pipeline.config());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
