use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::ThreadCpuStopwatch;
use crate::errors::BenchError;
use crate::input::{InputGenerator, ValueRange};
use crate::report;
use crate::triples::Algorithm;

pub const DEFAULT_TRIALS: usize = 20;
pub const DEFAULT_MIN_SIZE: usize = 1;
pub const DEFAULT_MAX_SIZE: usize = 1 << 14;

/// Parameters for one experiment: every size in the doubling progression
/// gets `trials` fresh random inputs.
#[derive(Debug, Clone, Serialize)]
pub struct BenchConfig {
    pub trials: usize,
    pub min_size: usize,
    pub max_size: usize,
    pub range: ValueRange,
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub warmup: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            range: ValueRange::default(),
            seed: None,
            algorithm: Algorithm::Fast,
            warmup: true,
        }
    }
}

/// One averaged data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub size: usize,
    pub trials: usize,
    pub mean_nanos: f64,
    /// Triple count from the final trial, kept so the work is observable.
    pub last_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub algorithm: Algorithm,
    pub samples: Vec<Sample>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Input sizes `min, 2*min, 4*min, ...` up to and including `max`.
///
/// Empty when `min` is zero or greater than `max`.
pub fn sizes(min: usize, max: usize) -> Vec<usize> {
    let mut out = Vec::new();
    if min == 0 {
        return out;
    }
    let mut size = min;
    while size <= max {
        out.push(size);
        size = match size.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }
    out
}

/// Touch a buffer of `size` elements and run one untimed trial so the
/// allocator and caches are warm before the batch is measured.
fn warm_up(size: usize, generator: &mut InputGenerator, algorithm: Algorithm) {
    let mut scratch = generator.generate(size);
    std::hint::black_box(algorithm.count(&mut scratch));
}

/// Time one batch of trials for a single input size.
pub fn run_batch(size: usize, config: &BenchConfig, generator: &mut InputGenerator) -> Sample {
    if config.warmup {
        warm_up(size, generator, config.algorithm);
    }

    let mut batch_nanos: u128 = 0;
    let mut last_count = 0;
    for trial in 0..config.trials {
        let mut values = generator.generate(size);

        let watch = ThreadCpuStopwatch::start();
        last_count = std::hint::black_box(config.algorithm.count(&mut values));
        let elapsed = watch.elapsed();

        debug!(size, trial, nanos = elapsed.as_nanos() as u64, count = last_count, "trial done");
        batch_nanos += elapsed.as_nanos();
    }

    let mean_nanos = if config.trials == 0 {
        0.0
    } else {
        batch_nanos as f64 / config.trials as f64
    };

    Sample {
        size,
        trials: config.trials,
        mean_nanos,
        last_count,
    }
}

/// Run every batch, writing the header and one row per size to `out`.
/// Each row is flushed as soon as its batch finishes.
pub fn run_experiment<W: Write>(
    config: &BenchConfig,
    generator: &mut InputGenerator,
    out: &mut W,
) -> std::io::Result<ExperimentReport> {
    let started_at = Utc::now();

    writeln!(out, "{}", report::HEADER)?;
    out.flush()?;

    let mut samples = Vec::new();
    for size in sizes(config.min_size, config.max_size) {
        info!(size, "running batch");
        let sample = run_batch(size, config, generator);

        writeln!(out, "{}", report::format_row(sample.size, sample.mean_nanos))?;
        out.flush()?;

        debug!(size, mean_nanos = sample.mean_nanos, "batch done");
        samples.push(sample);
    }

    Ok(ExperimentReport {
        algorithm: config.algorithm,
        samples,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Create `path` (and its parent directory) and run one experiment into it.
pub fn run_to_file(config: &BenchConfig, path: &Path) -> Result<ExperimentReport> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| BenchError::ResultsFile {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| BenchError::ResultsFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let mut generator = InputGenerator::new(config.range, config.seed);
    let report = run_experiment(config, &mut generator, &mut writer).map_err(|source| {
        BenchError::WriteResults {
            path: path.to_path_buf(),
            source,
        }
    })?;

    Ok(report)
}
