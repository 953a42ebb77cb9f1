use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::parallel_eval::{Member, StepContext, advance_members, initialize_members};
use crate::{
	Bounds, CallbackAction, Objective, PsoConfig, PsoError, PsoIntermediate, PsoReport, argbest,
};

/// Particle swarm optimizer
pub struct ParticleSwarm<'a, F>
where
	F: Objective + ?Sized,
{
	objective: &'a F,
	bounds: Bounds,
	config: PsoConfig,
}

impl<'a, F> ParticleSwarm<'a, F>
where
	F: Objective + ?Sized,
{
	/// Create a new PSO optimizer with objective `objective` over `bounds`
	pub fn new(objective: &'a F, bounds: Bounds) -> Self {
		Self { objective, bounds, config: PsoConfig::default() }
	}

	pub fn with_config(mut self, config: PsoConfig) -> Self {
		self.config = config;
		self
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut PsoConfig {
		&mut self.config
	}

	pub fn bounds(&self) -> &Bounds {
		&self.bounds
	}

	/// Run with a generator seeded from `config.seed`, or from the thread
	/// generator when no seed is set
	pub fn solve(&mut self) -> Result<PsoReport, PsoError> {
		let mut rng: StdRng = match self.config.seed {
			Some(s) => StdRng::seed_from_u64(s),
			None => {
				let mut thread_rng = rand::rng();
				StdRng::from_rng(&mut thread_rng)
			}
		};
		self.solve_with_rng(&mut rng)
	}

	/// Run with an injected generator. `config.seed` is ignored.
	///
	/// Each particle receives its own stream split from `rng`, so sequential
	/// and parallel runs draw identical numbers.
	pub fn solve_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<PsoReport, PsoError> {
		self.config.validate()?;
		let n = self.bounds.dim();
		if n == 0 {
			return Err(PsoError::InvalidConfig("dimension must be positive".into()));
		}
		let npart = self.config.num_particles;
		let direction = self.config.direction;
		let pool = self.config.parallel.build_pool()?;

		log::info!(
			"PSO init: {} dimensions ({} fixed), particles={}, max_iter={}, {}",
			n,
			self.bounds.num_fixed(),
			npart,
			self.config.max_iter,
			direction
		);
		log::debug!(
			"  weights: w={:.3}, c1={:.3}, c2={:.3}, velocity_clamp={:?}",
			self.config.w,
			self.config.c1,
			self.config.c2,
			self.config.velocity_clamp
		);

		let streams: Vec<StdRng> = (0..npart).map(|_| StdRng::from_rng(&mut *rng)).collect();
		let mut members = initialize_members(
			streams,
			&self.bounds,
			self.config.velocity_range,
			self.objective,
			&self.config.parallel,
			pool.as_ref(),
		)?;
		let mut nfev = npart;

		let (mut best_idx, mut best_f) =
			argbest(members.iter().map(|m| m.particle.best_value()), direction)
				.ok_or_else(|| PsoError::InvalidConfig("empty swarm".into()))?;
		let mut best_x = members[best_idx].particle.best_position().clone();

		log::debug!("PSO iter {:4}  best_f={:.6e} at particle {}", 0, best_f, best_idx);

		let mut stopped_early = self.notify(&members, &best_x, best_f, 0);
		let mut nit = 0;

		while !stopped_early && nit < self.config.max_iter {
			nit += 1;
			let ctx = StepContext {
				global_best: &best_x,
				bounds: &self.bounds,
				objective: self.objective,
				w: self.config.w,
				c1: self.config.c1,
				c2: self.config.c2,
				velocity_clamp: self.config.velocity_clamp,
				direction,
			};
			advance_members(&mut members, &ctx, &self.config.parallel, pool.as_ref())?;
			nfev += npart;

			// Personal bests never worsen, so neither does their best.
			let (idx, f) = argbest(members.iter().map(|m| m.particle.best_value()), direction)
				.ok_or_else(|| PsoError::InvalidConfig("empty swarm".into()))?;
			let improved = direction.is_better(f, best_f);
			best_idx = idx;
			best_f = f;
			best_x.assign(members[best_idx].particle.best_position());

			log::debug!(
				"PSO iter {:4}  best_f={:.6e}  spread={:.3e}  improved={}",
				nit,
				best_f,
				spread(&members),
				improved
			);

			stopped_early = self.notify(&members, &best_x, best_f, nit);
		}

		let message = if stopped_early {
			"Optimization stopped by callback".to_string()
		} else {
			format!("Maximum iterations reached: {}", self.config.max_iter)
		};
		log::info!("PSO finished: {} (best_f={:.6e}, nfev={})", message, best_f, nfev);

		Ok(PsoReport {
			x: best_x,
			fun: best_f,
			message,
			stopped_early,
			nit,
			nfev,
			positions: positions(&members, n),
			best_values: best_values(&members),
		})
	}

	/// Invoke the callback if any; returns true when it asks to stop
	fn notify(
		&mut self,
		members: &[Member],
		best_x: &Array1<f64>,
		best_f: f64,
		iter: usize,
	) -> bool {
		let Some(cb) = self.config.callback.as_mut() else {
			return false;
		};
		let intermediate = PsoIntermediate {
			x: best_x.clone(),
			fun: best_f,
			spread: spread(members),
			iter,
			positions: positions(members, best_x.len()),
			best_values: best_values(members),
		};
		matches!(cb(&intermediate), CallbackAction::Stop)
	}
}

fn positions(members: &[Member], n: usize) -> Array2<f64> {
	let mut out = Array2::<f64>::zeros((members.len(), n));
	for (i, m) in members.iter().enumerate() {
		out.row_mut(i).assign(m.particle.position());
	}
	out
}

fn best_values(members: &[Member]) -> Array1<f64> {
	members.iter().map(|m| m.particle.best_value()).collect()
}

fn spread(members: &[Member]) -> f64 {
	best_values(members).std(0.0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Direction, PsoConfigBuilder};

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	fn bounds2() -> Bounds {
		Bounds::new(&[(-5.0, 5.0), (-5.0, 5.0)]).unwrap()
	}

	#[test]
	fn test_zero_iterations_returns_initial_best() {
		let cfg = PsoConfigBuilder::new().seed(11).num_particles(12).max_iter(0).build();
		let report = ParticleSwarm::new(&sphere, bounds2()).with_config(cfg).solve().unwrap();
		assert_eq!(report.nit, 0);
		assert_eq!(report.nfev, 12);
		let min = report.best_values.iter().cloned().fold(f64::INFINITY, f64::min);
		assert_eq!(report.fun, min);
		assert_eq!(sphere(&report.x), report.fun);
	}

	#[test]
	fn test_initial_best_uses_run_direction() {
		// The initial global best is the minimum personal best when minimizing
		// and the maximum when maximizing; never a mix of both.
		for (direction, pick) in [
			(Direction::Minimize, f64::min as fn(f64, f64) -> f64),
			(Direction::Maximize, f64::max as fn(f64, f64) -> f64),
		] {
			let cfg = PsoConfigBuilder::new()
				.seed(5)
				.num_particles(25)
				.max_iter(0)
				.direction(direction)
				.build();
			let report = ParticleSwarm::new(&sphere, bounds2()).with_config(cfg).solve().unwrap();
			let start = match direction {
				Direction::Minimize => f64::INFINITY,
				Direction::Maximize => f64::NEG_INFINITY,
			};
			let expected = report.best_values.iter().cloned().fold(start, pick);
			assert_eq!(report.fun, expected);
		}
	}

	#[test]
	fn test_same_seed_same_result() {
		let run = || {
			let cfg = PsoConfigBuilder::new().seed(42).num_particles(10).max_iter(20).build();
			ParticleSwarm::new(&sphere, bounds2()).with_config(cfg).solve().unwrap()
		};
		let a = run();
		let b = run();
		assert_eq!(a.x, b.x);
		assert_eq!(a.fun, b.fun);
		assert_eq!(a.positions, b.positions);
	}

	#[test]
	fn test_injected_rng() {
		let mut rng = StdRng::seed_from_u64(9);
		let mut swarm = ParticleSwarm::new(&sphere, bounds2())
			.with_config(PsoConfigBuilder::new().num_particles(8).max_iter(10).build());
		let a = swarm.solve_with_rng(&mut rng).unwrap();
		let mut rng = StdRng::seed_from_u64(9);
		let b = swarm.solve_with_rng(&mut rng).unwrap();
		assert_eq!(a.x, b.x);
		assert_eq!(a.nfev, 8 * 11);
	}

	#[test]
	fn test_callback_stop() {
		let cfg = PsoConfigBuilder::new()
			.seed(3)
			.max_iter(100)
			.callback(Box::new(|it: &PsoIntermediate| {
				if it.iter >= 4 { CallbackAction::Stop } else { CallbackAction::Continue }
			}))
			.build();
		let report = ParticleSwarm::new(&sphere, bounds2()).with_config(cfg).solve().unwrap();
		assert!(report.stopped_early);
		assert_eq!(report.nit, 4);
		assert_eq!(report.message, "Optimization stopped by callback");
	}

	#[test]
	fn test_zero_dimension_is_rejected() {
		let b = Bounds::new(&[]).unwrap();
		let err = ParticleSwarm::new(&sphere, b).solve().unwrap_err();
		assert!(matches!(err, PsoError::InvalidConfig(_)));
	}
}
