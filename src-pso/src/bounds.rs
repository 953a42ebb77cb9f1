use ndarray::Array1;
use rand::Rng;

use crate::PsoError;

/// Per-dimension inclusive box `[lower[i], upper[i]]`
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
	lower: Array1<f64>,
	upper: Array1<f64>,
}

impl Bounds {
	/// Build bounds from `(min, max)` pairs.
	///
	/// Fails on `min > max`, non-finite limits, or a span that overflows.
	/// Limits are never swapped.
	pub fn new(pairs: &[(f64, f64)]) -> Result<Self, PsoError> {
		let n = pairs.len();
		let mut lower = Array1::<f64>::zeros(n);
		let mut upper = Array1::<f64>::zeros(n);
		for (i, &(lo, hi)) in pairs.iter().enumerate() {
			let valid =
				lo.is_finite() && hi.is_finite() && lo <= hi && (hi - lo).is_finite();
			if !valid {
				return Err(PsoError::InvalidBounds { index: i, min: lo, max: hi });
			}
			lower[i] = lo;
			upper[i] = hi;
		}
		Ok(Self { lower, upper })
	}

	/// Like [`Bounds::new`] but also checks the number of pairs against `dim`
	pub fn with_dim(dim: usize, pairs: &[(f64, f64)]) -> Result<Self, PsoError> {
		if pairs.len() != dim {
			return Err(PsoError::BoundsDimensionMismatch { expected: dim, found: pairs.len() });
		}
		Self::new(pairs)
	}

	pub fn dim(&self) -> usize {
		self.lower.len()
	}

	pub fn lower(&self) -> &Array1<f64> {
		&self.lower
	}

	pub fn upper(&self) -> &Array1<f64> {
		&self.upper
	}

	/// True when dimension `i` collapses to a single value
	pub fn is_fixed(&self, i: usize) -> bool {
		self.lower[i] == self.upper[i]
	}

	pub fn num_fixed(&self) -> usize {
		(0..self.dim()).filter(|&i| self.is_fixed(i)).count()
	}

	/// Draw a point uniformly inside the box
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<f64> {
		Array1::from_shape_fn(self.dim(), |i| {
			if self.is_fixed(i) {
				self.lower[i]
			} else {
				rng.random_range(self.lower[i]..=self.upper[i])
			}
		})
	}

	/// Project `x` onto the box, component-wise.
	///
	/// NaN components land on the lower bound.
	pub fn clamp(&self, x: &mut Array1<f64>) {
		for i in 0..x.len() {
			if self.is_fixed(i) || x[i].is_nan() {
				x[i] = self.lower[i];
			} else {
				x[i] = x[i].clamp(self.lower[i], self.upper[i]);
			}
		}
	}

	pub fn contains(&self, x: &Array1<f64>) -> bool {
		x.len() == self.dim()
			&& x.iter().enumerate().all(|(i, &v)| v >= self.lower[i] && v <= self.upper[i])
	}
}
