//! Objective function contract
//!
//! Any `Fn(&Array1<f64>) -> f64 + Sync` is an objective. Objectives that can
//! fail are wrapped in [`Fallible`].

use std::fmt;

use ndarray::Array1;
use thiserror::Error;

use crate::PsoError;

/// Failure reported by an objective for a given position
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct ObjectiveError(pub String);

/// Scalar objective over a position vector. Must be safe to call concurrently.
pub trait Objective: Sync {
	fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError>;
}

impl<F> Objective for F
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
		Ok(self(x))
	}
}

/// Adapter for objectives returning `Result<f64, E>`
pub struct Fallible<F>(pub F);

impl<F, E> Objective for Fallible<F>
where
	F: Fn(&Array1<f64>) -> Result<f64, E> + Sync,
	E: fmt::Display,
{
	fn evaluate(&self, x: &Array1<f64>) -> Result<f64, ObjectiveError> {
		(self.0)(x).map_err(|e| ObjectiveError(e.to_string()))
	}
}

/// Evaluate `objective` at `x`; failures and NaN values become
/// [`PsoError::ObjectiveEvaluationFailed`].
pub(crate) fn evaluate_checked<O>(objective: &O, x: &Array1<f64>) -> Result<f64, PsoError>
where
	O: Objective + ?Sized,
{
	match objective.evaluate(x) {
		Ok(v) if v.is_nan() => Err(PsoError::ObjectiveEvaluationFailed {
			position: x.to_vec(),
			reason: "objective returned NaN".into(),
		}),
		Ok(v) => Ok(v),
		Err(e) => {
			Err(PsoError::ObjectiveEvaluationFailed { position: x.to_vec(), reason: e.0 })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sum(x: &Array1<f64>) -> f64 {
		x.sum()
	}

	#[test]
	fn test_plain_closure_is_objective() {
		let x = Array1::from(vec![1.0, 2.0]);
		assert_eq!(sum.evaluate(&x), Ok(3.0));
		let scaled = |x: &Array1<f64>| 2.0 * x.sum();
		assert_eq!(evaluate_checked(&scaled, &x).unwrap(), 6.0);
	}

	#[test]
	fn test_fallible_maps_error() {
		let f = Fallible(|x: &Array1<f64>| -> Result<f64, String> {
			if x[0] > 0.0 { Err("positive input".to_string()) } else { Ok(x[0]) }
		});
		assert_eq!(f.evaluate(&Array1::from(vec![-1.0])), Ok(-1.0));
		let err = evaluate_checked(&f, &Array1::from(vec![1.0])).unwrap_err();
		match err {
			PsoError::ObjectiveEvaluationFailed { position, reason } => {
				assert_eq!(position, vec![1.0]);
				assert_eq!(reason, "positive input");
			}
			other => panic!("unexpected error {other:?}"),
		}
	}

	#[test]
	fn test_nan_is_a_failure() {
		let f = |_: &Array1<f64>| f64::NAN;
		assert!(evaluate_checked(&f, &Array1::from(vec![0.0])).is_err());
		let g = |_: &Array1<f64>| f64::INFINITY;
		assert_eq!(evaluate_checked(&g, &Array1::from(vec![0.0])).unwrap(), f64::INFINITY);
	}
}
