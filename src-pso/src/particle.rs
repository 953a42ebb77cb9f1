use ndarray::Array1;
use rand::Rng;

use crate::objective::evaluate_checked;
use crate::{Bounds, Direction, Objective, PsoError};

/// One candidate solution with its velocity and personal best
#[derive(Debug, Clone)]
pub struct Particle {
	position: Array1<f64>,
	velocity: Array1<f64>,
	best_position: Array1<f64>,
	best_value: f64,
}

impl Particle {
	/// Random position inside `bounds`, velocity uniform in
	/// `[-velocity_range, velocity_range]`. Evaluates the objective once.
	pub fn initialize<O, R>(
		bounds: &Bounds,
		velocity_range: f64,
		objective: &O,
		rng: &mut R,
	) -> Result<Self, PsoError>
	where
		O: Objective + ?Sized,
		R: Rng + ?Sized,
	{
		let position = bounds.sample(rng);
		let velocity = if velocity_range > 0.0 {
			Array1::from_shape_fn(bounds.dim(), |_| {
				rng.random_range(-velocity_range..=velocity_range)
			})
		} else {
			Array1::zeros(bounds.dim())
		};
		let best_value = evaluate_checked(objective, &position)?;
		Ok(Self { best_position: position.clone(), position, velocity, best_value })
	}

	/// Build a particle from explicit state; `best_value` must be the
	/// objective value at `position`.
	#[cfg(test)]
	pub(crate) fn from_parts(position: Array1<f64>, velocity: Array1<f64>, best_value: f64) -> Self {
		Self { best_position: position.clone(), position, velocity, best_value }
	}

	/// Standard inertia + cognitive + social update with fresh r1, r2 per dimension.
	///
	/// `velocity_clamp`, when set, bounds every component to `[-vmax, vmax]`.
	pub fn update_velocity<R: Rng + ?Sized>(
		&mut self,
		global_best: &Array1<f64>,
		w: f64,
		c1: f64,
		c2: f64,
		velocity_clamp: Option<f64>,
		rng: &mut R,
	) {
		for i in 0..self.position.len() {
			let r1 = rng.random::<f64>();
			let r2 = rng.random::<f64>();
			let mut v = w * self.velocity[i]
				+ c1 * r1 * (self.best_position[i] - self.position[i])
				+ c2 * r2 * (global_best[i] - self.position[i]);
			if let Some(vmax) = velocity_clamp {
				v = v.clamp(-vmax, vmax);
			}
			self.velocity[i] = v;
		}
	}

	/// Move by the current velocity, clamp into `bounds`, evaluate once and
	/// keep the new position as personal best if strictly better.
	///
	/// Returns whether the personal best improved.
	pub fn advance<O>(
		&mut self,
		bounds: &Bounds,
		objective: &O,
		direction: Direction,
	) -> Result<bool, PsoError>
	where
		O: Objective + ?Sized,
	{
		self.position += &self.velocity;
		bounds.clamp(&mut self.position);
		let value = evaluate_checked(objective, &self.position)?;
		if direction.is_better(value, self.best_value) {
			self.best_value = value;
			self.best_position.assign(&self.position);
			return Ok(true);
		}
		Ok(false)
	}

	pub fn position(&self) -> &Array1<f64> {
		&self.position
	}

	pub fn velocity(&self) -> &Array1<f64> {
		&self.velocity
	}

	pub fn best_position(&self) -> &Array1<f64> {
		&self.best_position
	}

	pub fn best_value(&self) -> f64 {
		self.best_value
	}
}
