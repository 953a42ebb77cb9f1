use ndarray::Array1;
use rand::rngs::StdRng;
use rayon::ThreadPool;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Bounds, Direction, Objective, Particle, PsoError};

/// Parallel evaluation settings for the per-particle update phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
	/// Update particles on the rayon pool
	pub enabled: bool,
	/// Dedicated pool size; `None` uses the global rayon pool
	pub num_threads: Option<usize>,
}

impl ParallelConfig {
	pub(crate) fn build_pool(&self) -> Result<Option<ThreadPool>, PsoError> {
		match (self.enabled, self.num_threads) {
			(true, Some(n)) => {
				Ok(Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?))
			}
			_ => Ok(None),
		}
	}
}

/// A particle together with its own random stream
pub(crate) struct Member {
	pub particle: Particle,
	pub rng: StdRng,
}

/// Read-only inputs shared by every particle during one iteration
pub(crate) struct StepContext<'a, O: Objective + ?Sized> {
	pub global_best: &'a Array1<f64>,
	pub bounds: &'a Bounds,
	pub objective: &'a O,
	pub w: f64,
	pub c1: f64,
	pub c2: f64,
	pub velocity_clamp: Option<f64>,
	pub direction: Direction,
}

impl<O: Objective + ?Sized> StepContext<'_, O> {
	fn step(&self, member: &mut Member) -> Result<(), PsoError> {
		member.particle.update_velocity(
			self.global_best,
			self.w,
			self.c1,
			self.c2,
			self.velocity_clamp,
			&mut member.rng,
		);
		member.particle.advance(self.bounds, self.objective, self.direction)?;
		Ok(())
	}
}

/// Initialize one particle per stream, possibly in parallel
pub(crate) fn initialize_members<O>(
	streams: Vec<StdRng>,
	bounds: &Bounds,
	velocity_range: f64,
	objective: &O,
	parallel: &ParallelConfig,
	pool: Option<&ThreadPool>,
) -> Result<Vec<Member>, PsoError>
where
	O: Objective + ?Sized,
{
	let init = |mut rng: StdRng| -> Result<Member, PsoError> {
		let particle = Particle::initialize(bounds, velocity_range, objective, &mut rng)?;
		Ok(Member { particle, rng })
	};
	if !parallel.enabled {
		return streams.into_iter().map(init).collect();
	}
	let run = || -> Result<Vec<Member>, PsoError> {
		streams.into_par_iter().map(init).collect()
	};
	match pool {
		Some(pool) => pool.install(run),
		None => run(),
	}
}

/// Update velocity then move every member. The first failing particle aborts
/// the iteration.
pub(crate) fn advance_members<O>(
	members: &mut [Member],
	ctx: &StepContext<'_, O>,
	parallel: &ParallelConfig,
	pool: Option<&ThreadPool>,
) -> Result<(), PsoError>
where
	O: Objective + ?Sized,
{
	if !parallel.enabled {
		return members.iter_mut().try_for_each(|m| ctx.step(m));
	}
	let step = |m: &mut Member| -> Result<(), PsoError> { ctx.step(m) };
	match pool {
		Some(pool) => pool.install(|| members.par_iter_mut().try_for_each(step)),
		None => members.par_iter_mut().try_for_each(step),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pool_only_when_enabled_with_threads() {
		assert!(ParallelConfig::default().build_pool().unwrap().is_none());
		let cfg = ParallelConfig { enabled: false, num_threads: Some(2) };
		assert!(cfg.build_pool().unwrap().is_none());
		let cfg = ParallelConfig { enabled: true, num_threads: None };
		assert!(cfg.build_pool().unwrap().is_none());
		let cfg = ParallelConfig { enabled: true, num_threads: Some(2) };
		let pool = cfg.build_pool().unwrap().unwrap();
		assert_eq!(pool.current_num_threads(), 2);
	}
}
