use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::BenchError;
use crate::harness::{BenchConfig, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_TRIALS};
use crate::input::{DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, ValueRange};
use crate::triples::Algorithm;

pub const DEFAULT_RESULTS_DIR: &str = "results";

/// The first run exists only to warm the process up; its numbers are
/// usually thrown away.
pub const DEFAULT_RUNS: [&str; 3] = [
    "ThreeSumFast-Exp1-ThrowAway.txt",
    "ThreeSumFast-Exp2.txt",
    "ThreeSumFast-Exp3.txt",
];

/// Partial settings from a config file or the command line. `None` leaves
/// the lower layer's value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub results_dir: Option<PathBuf>,
    pub runs: Option<Vec<String>>,
    pub trials: Option<usize>,
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
    pub min_value: Option<i64>,
    pub max_value: Option<i64>,
    pub seed: Option<u64>,
    pub algorithm: Option<Algorithm>,
    pub warmup: Option<bool>,
}

/// Fully resolved settings for a whole invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub results_dir: PathBuf,
    pub runs: Vec<String>,
    pub trials: usize,
    pub min_size: usize,
    pub max_size: usize,
    pub min_value: i64,
    pub max_value: i64,
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub warmup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            runs: DEFAULT_RUNS.iter().map(|s| s.to_string()).collect(),
            trials: DEFAULT_TRIALS,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            seed: None,
            algorithm: Algorithm::Fast,
            warmup: true,
        }
    }
}

impl Config {
    /// Overlay every field `settings` sets.
    pub fn merge(mut self, settings: Settings) -> Self {
        if let Some(v) = settings.results_dir {
            self.results_dir = v;
        }
        if let Some(v) = settings.runs {
            self.runs = v;
        }
        if let Some(v) = settings.trials {
            self.trials = v;
        }
        if let Some(v) = settings.min_size {
            self.min_size = v;
        }
        if let Some(v) = settings.max_size {
            self.max_size = v;
        }
        if let Some(v) = settings.min_value {
            self.min_value = v;
        }
        if let Some(v) = settings.max_value {
            self.max_value = v;
        }
        if settings.seed.is_some() {
            self.seed = settings.seed;
        }
        if let Some(v) = settings.algorithm {
            self.algorithm = v;
        }
        if let Some(v) = settings.warmup {
            self.warmup = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.trials == 0 {
            return Err(BenchError::InvalidConfig("trials must be at least 1".into()));
        }
        if self.min_size == 0 {
            return Err(BenchError::InvalidConfig(
                "min size must be at least 1 (sizes double from it)".into(),
            ));
        }
        if self.min_size > self.max_size {
            return Err(BenchError::InvalidConfig(format!(
                "min size {} is larger than max size {}",
                self.min_size, self.max_size
            )));
        }
        if self.runs.is_empty() {
            return Err(BenchError::InvalidConfig("no runs configured".into()));
        }
        if let Some(name) = self.runs.iter().find(|r| r.trim().is_empty()) {
            return Err(BenchError::InvalidConfig(format!(
                "run file name {name:?} is blank"
            )));
        }
        ValueRange::new(self.min_value, self.max_value)?;
        Ok(())
    }

    pub fn bench_config(&self) -> Result<BenchConfig, BenchError> {
        self.validate()?;
        Ok(BenchConfig {
            trials: self.trials,
            min_size: self.min_size,
            max_size: self.max_size,
            range: ValueRange::new(self.min_value, self.max_value)?,
            seed: self.seed,
            algorithm: self.algorithm,
            warmup: self.warmup,
        })
    }

    pub fn run_paths(&self) -> Vec<PathBuf> {
        self.runs.iter().map(|name| self.results_dir.join(name)).collect()
    }
}

/// `$XDG_CONFIG_HOME/threesum-bench/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("threesum-bench").join("config.toml"))
}

pub fn load_settings(path: &Path) -> Result<Settings, BenchError> {
    let text = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&text, path)
}

pub fn parse_settings(text: &str, path: &Path) -> Result<Settings, BenchError> {
    toml::from_str(text).map_err(|e| BenchError::ConfigParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Settings from an explicit path, or from the default location when that
/// file exists. An explicit path that cannot be read is an error.
pub fn resolve_file_settings(explicit: Option<&Path>) -> Result<Settings, BenchError> {
    match explicit {
        Some(path) => load_settings(path),
        None => match default_config_path() {
            Some(path) if path.is_file() => load_settings(&path),
            _ => Ok(Settings::default()),
        },
    }
}
