use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Could not create results file {path}: {source}")]
    ResultsFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write results to {path}: {source}")]
    WriteResults {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Self-check failed: expected >0 and 0 triples, got {with_triples} and {without_triples}")]
    SelfCheckFailed {
        with_triples: u64,
        without_triples: u64,
    },

    #[error("{failed} of {total} benchmark runs failed")]
    RunsFailed { failed: usize, total: usize },
}
