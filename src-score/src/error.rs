use std::path::PathBuf;

use swarmrank_pso::PsoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("dimension mismatch: expected {expected} values, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("no complete samples in dataset")]
    EmptyDataset,

    #[error(transparent)]
    Pso(#[from] PsoError),
}

impl ScoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScoreError::Io { path: path.into(), source }
    }
}
