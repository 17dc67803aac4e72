use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::harness::{BenchConfig, ExperimentReport, Sample};
use crate::verify::SelfCheck;

/// `#` marks a comment line for gnuplot.
pub const HEADER: &str = "#InputSize    AverageTime";

/// One results row: input size and mean CPU nanoseconds per trial.
pub fn format_row(size: usize, mean_nanos: f64) -> String {
    format!("{:>12}  {:>15.2} ", size, mean_nanos)
}

/// Format nanoseconds with a human-friendly unit for console output.
pub fn format_nanos(nanos: f64) -> String {
    if nanos < 1_000.0 {
        format!("{:.0}ns", nanos)
    } else if nanos < 1_000_000.0 {
        format!("{:.2}µs", nanos / 1_000.0)
    } else if nanos < 1_000_000_000.0 {
        format!("{:.2}ms", nanos / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos / 1_000_000_000.0)
    }
}

/// Ratio of each sample's mean to the previous one. Roughly 4 for the
/// fast counter once sizes are past the noise floor.
pub fn growth_ratios(samples: &[Sample]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(samples.len());
    for (i, sample) in samples.iter().enumerate() {
        let ratio = if i == 0 {
            None
        } else {
            let prev = samples[i - 1].mean_nanos;
            (prev > 0.0).then(|| sample.mean_nanos / prev)
        };
        out.push(ratio);
    }
    out
}

/// Console table for a finished run.
pub fn format_summary(path: &Path, report: &ExperimentReport) -> String {
    let mut out = String::new();

    let title = format!(
        "{} ({}, {} sizes)",
        path.display(),
        report.algorithm.name(),
        report.samples.len()
    );
    out.push_str(
        &title
            .if_supports_color(Stream::Stdout, |s| s.bold())
            .to_string(),
    );
    out.push('\n');

    let ratios = growth_ratios(&report.samples);
    for (sample, ratio) in report.samples.iter().zip(ratios) {
        let size = format!("{:>8}", sample.size);
        let time = format!("{:>10}", format_nanos(sample.mean_nanos));
        let growth = match ratio {
            Some(r) => format!("x{:.2}", r),
            None => String::new(),
        };
        out.push_str(&format!(
            "  {}  {}  {}\n",
            size.if_supports_color(Stream::Stdout, |s| s.cyan()),
            time.if_supports_color(Stream::Stdout, |s| s.yellow()),
            growth.if_supports_color(Stream::Stdout, |s| s.dimmed()),
        ));
    }

    out
}

/// Console lines for the self-check.
pub fn format_self_check(check: &SelfCheck) -> String {
    let status = if check.passed() {
        "PASS"
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string()
    } else {
        "FAIL"
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string()
    };
    format!(
        "Self-check: {} (with triples = {}, without triples = {})\n",
        status, check.with_triples, check.without_triples
    )
}

#[derive(Serialize)]
struct JsonRun<'a> {
    path: String,
    algorithm: &'static str,
    started_at: String,
    finished_at: String,
    samples: &'a [Sample],
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    config: &'a BenchConfig,
    runs: Vec<JsonRun<'a>>,
}

/// JSON document covering every completed run.
pub fn format_json(config: &BenchConfig, runs: &[(PathBuf, ExperimentReport)]) -> String {
    let output = JsonOutput {
        config,
        runs: runs
            .iter()
            .map(|(path, report)| JsonRun {
                path: path.to_string_lossy().to_string(),
                algorithm: report.algorithm.name(),
                started_at: report.started_at.to_rfc3339(),
                finished_at: report.finished_at.to_rfc3339(),
                samples: &report.samples,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
