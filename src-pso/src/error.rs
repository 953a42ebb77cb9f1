use thiserror::Error;

/// Errors raised by a particle swarm run
#[derive(Error, Debug)]
pub enum PsoError {
	#[error("invalid bounds for dimension {index}: [{min}, {max}]")]
	InvalidBounds { index: usize, min: f64, max: f64 },

	#[error("invalid bounds: expected {expected} dimensions, got {found}")]
	BoundsDimensionMismatch { expected: usize, found: usize },

	#[error("objective evaluation failed at {position:?}: {reason}")]
	ObjectiveEvaluationFailed { position: Vec<f64>, reason: String },

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("failed to build thread pool: {0}")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Coarse classification of [`PsoError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	InvalidBounds,
	ObjectiveEvaluationFailed,
	InvalidConfig,
}

impl PsoError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			PsoError::InvalidBounds { .. } | PsoError::BoundsDimensionMismatch { .. } => {
				ErrorKind::InvalidBounds
			}
			PsoError::ObjectiveEvaluationFailed { .. } => ErrorKind::ObjectiveEvaluationFailed,
			PsoError::InvalidConfig(_) | PsoError::ThreadPool(_) => ErrorKind::InvalidConfig,
		}
	}
}
