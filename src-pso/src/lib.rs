//! Particle Swarm Optimization (PSO) global optimizer in pure Rust using ndarray
//!
//! A population of particles explores a box-bounded continuous space. Each
//! iteration every particle blends its previous velocity (inertia `w`), a pull
//! toward its own best position (cognitive `c1`) and a pull toward the best
//! position of the swarm (social `c2`), moves, is clamped back into the box
//! and keeps its personal best. The swarm best is reduced once per iteration.
//!
//! Supported features:
//! - Box constraints, including degenerate `min == max` dimensions
//! - Minimization or maximization with one consistent comparison direction
//! - Seeded, reproducible runs; or an injected random generator
//! - Optional velocity clamp
//! - Per-iteration callback with early stop
//! - Parallel particle updates with rayon, bit-identical to sequential runs

#![allow(missing_docs)]
use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

pub mod bounds;
pub mod error;
pub mod objective;
pub mod parallel_eval;
pub mod particle;
pub mod particle_swarm;
pub mod recorder;
pub mod run_recorded;
pub mod swarm;

pub use bounds::Bounds;
pub use error::{ErrorKind, PsoError};
pub use objective::{Fallible, Objective, ObjectiveError};
pub use parallel_eval::ParallelConfig;
pub use particle::Particle;
pub use particle_swarm::{optimize, particle_swarm};
pub use recorder::{OptimizationRecord, OptimizationRecorder, RecordError, SwarmSnapshot};
pub use run_recorded::{RecordedPaths, RecordedRunError, run_recorded_particle_swarm};
pub use swarm::ParticleSwarm;

/// Index and value of the best entry under `direction`; the first of equal
/// values wins. Returns `None` for an empty input.
pub(crate) fn argbest<I>(values: I, direction: Direction) -> Option<(usize, f64)>
where
	I: IntoIterator<Item = f64>,
{
	let mut best: Option<(usize, f64)> = None;
	for (i, v) in values.into_iter().enumerate() {
		match best {
			Some((_, b)) if !direction.is_better(v, b) => {}
			_ => best = Some((i, v)),
		}
	}
	best
}

/// Optimization direction, applied to both personal and global bests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	#[default]
	Minimize,
	Maximize,
}

impl Direction {
	/// Strict comparison: equal values are never better
	pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
		match self {
			Direction::Minimize => candidate < incumbent,
			Direction::Maximize => candidate > incumbent,
		}
	}
}

impl FromStr for Direction {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"min" | "minimize" | "minimise" => Ok(Direction::Minimize),
			"max" | "maximize" | "maximise" => Ok(Direction::Maximize),
			_ => Err(format!("unknown direction: {}", s)),
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Direction::Minimize => write!(f, "minimize"),
			Direction::Maximize => write!(f, "maximize"),
		}
	}
}

/// Configuration for the particle swarm optimizer
pub struct PsoConfig {
	/// Swarm size
	pub num_particles: usize,
	/// Iteration budget; 0 returns the best of the initial swarm
	pub max_iter: usize,
	/// Inertia weight
	pub w: f64,
	/// Cognitive weight (pull toward the personal best)
	pub c1: f64,
	/// Social weight (pull toward the global best)
	pub c2: f64,
	pub direction: Direction,
	pub seed: Option<u64>,
	/// Initial velocity components are uniform in `[-velocity_range, velocity_range]`
	pub velocity_range: f64,
	/// Optional per-component velocity cap
	pub velocity_clamp: Option<f64>,
	/// Optional per-iteration callback (may stop early)
	pub callback: Option<Box<dyn FnMut(&PsoIntermediate) -> CallbackAction>>,
	/// Parallel evaluation configuration
	pub parallel: ParallelConfig,
}

impl Default for PsoConfig {
	fn default() -> Self {
		Self {
			num_particles: 30,
			max_iter: 100,
			w: 0.5,
			c1: 1.5,
			c2: 1.5,
			direction: Direction::default(),
			seed: None,
			velocity_range: 1.0,
			velocity_clamp: None,
			callback: None,
			parallel: ParallelConfig::default(),
		}
	}
}

impl fmt::Debug for PsoConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PsoConfig")
			.field("num_particles", &self.num_particles)
			.field("max_iter", &self.max_iter)
			.field("w", &self.w)
			.field("c1", &self.c1)
			.field("c2", &self.c2)
			.field("direction", &self.direction)
			.field("seed", &self.seed)
			.field("velocity_range", &self.velocity_range)
			.field("velocity_clamp", &self.velocity_clamp)
			.field("callback", &self.callback.is_some())
			.field("parallel", &self.parallel)
			.finish()
	}
}

impl PsoConfig {
	/// Reject settings no run could use. Called before any particle is built.
	pub fn validate(&self) -> Result<(), PsoError> {
		if self.num_particles == 0 {
			return Err(PsoError::InvalidConfig("num_particles must be positive".into()));
		}
		for (name, v) in [("w", self.w), ("c1", self.c1), ("c2", self.c2)] {
			if !v.is_finite() {
				return Err(PsoError::InvalidConfig(format!("{} must be finite, got {}", name, v)));
			}
		}
		// sampling spans [-velocity_range, velocity_range], so its width must be finite
		if !((2.0 * self.velocity_range).is_finite() && self.velocity_range >= 0.0) {
			return Err(PsoError::InvalidConfig(format!(
				"velocity_range must be finite, non-negative and at most f64::MAX / 2, got {}",
				self.velocity_range
			)));
		}
		if let Some(vmax) = self.velocity_clamp {
			if !(vmax.is_finite() && vmax > 0.0) {
				return Err(PsoError::InvalidConfig(format!(
					"velocity_clamp must be finite and positive, got {}",
					vmax
				)));
			}
		}
		if self.parallel.num_threads == Some(0) {
			return Err(PsoError::InvalidConfig("num_threads must be positive".into()));
		}
		Ok(())
	}
}

/// Fluent builder for `PsoConfig` for ergonomic configuration.
pub struct PsoConfigBuilder {
	cfg: PsoConfig,
}

impl Default for PsoConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl PsoConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: PsoConfig::default() }
	}
	pub fn num_particles(mut self, v: usize) -> Self {
		self.cfg.num_particles = v;
		self
	}
	pub fn max_iter(mut self, v: usize) -> Self {
		self.cfg.max_iter = v;
		self
	}
	pub fn inertia(mut self, v: f64) -> Self {
		self.cfg.w = v;
		self
	}
	pub fn cognitive(mut self, v: f64) -> Self {
		self.cfg.c1 = v;
		self
	}
	pub fn social(mut self, v: f64) -> Self {
		self.cfg.c2 = v;
		self
	}
	/// Set `w`, `c1` and `c2` at once
	pub fn weights(mut self, w: f64, c1: f64, c2: f64) -> Self {
		self.cfg.w = w;
		self.cfg.c1 = c1;
		self.cfg.c2 = c2;
		self
	}
	pub fn direction(mut self, v: Direction) -> Self {
		self.cfg.direction = v;
		self
	}
	pub fn maximize(self) -> Self {
		self.direction(Direction::Maximize)
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn velocity_range(mut self, v: f64) -> Self {
		self.cfg.velocity_range = v;
		self
	}
	pub fn velocity_clamp(mut self, v: f64) -> Self {
		self.cfg.velocity_clamp = Some(v);
		self
	}
	pub fn callback(mut self, cb: Box<dyn FnMut(&PsoIntermediate) -> CallbackAction>) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		self.cfg.parallel = parallel;
		self
	}
	pub fn enable_parallel(mut self, enable: bool) -> Self {
		self.cfg.parallel.enabled = enable;
		self
	}
	pub fn parallel_threads(mut self, num_threads: usize) -> Self {
		self.cfg.parallel.num_threads = Some(num_threads);
		self
	}
	pub fn build(self) -> PsoConfig {
		self.cfg
	}
}

/// Result/Report of a PSO run
#[derive(Clone)]
pub struct PsoReport {
	/// Global best position
	pub x: Array1<f64>,
	/// Objective value at `x`
	pub fun: f64,
	pub message: String,
	/// True when the callback asked to stop
	pub stopped_early: bool,
	/// Iterations performed
	pub nit: usize,
	/// Objective evaluations
	pub nfev: usize,
	/// Final particle positions, one row per particle
	pub positions: Array2<f64>,
	/// Final personal-best values, one per particle
	pub best_values: Array1<f64>,
}

impl fmt::Debug for PsoReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PsoReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("message", &self.message)
			.field("stopped_early", &self.stopped_early)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"positions",
				&format!("{}x{}", self.positions.nrows(), self.positions.ncols()),
			)
			.field("best_values", &format!("len={}", self.best_values.len()))
			.finish()
	}
}

/// Information passed to the callback after initialization (`iter == 0`)
/// and after each iteration
pub struct PsoIntermediate {
	pub x: Array1<f64>,
	pub fun: f64,
	/// Standard deviation of the personal-best values
	pub spread: f64,
	pub iter: usize,
	/// Current particle positions, one row per particle
	pub positions: Array2<f64>,
	/// Current personal-best values, one per particle
	pub best_values: Array1<f64>,
}

/// Action returned by callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
	Continue,
	Stop,
}

#[cfg(test)]
mod direction_tests {
	use super::*;

	#[test]
	fn test_parse_direction_variants() {
		assert_eq!("min".parse::<Direction>().unwrap(), Direction::Minimize);
		assert_eq!("Maximize".parse::<Direction>().unwrap(), Direction::Maximize);
		assert!("sideways".parse::<Direction>().is_err());
	}

	#[test]
	fn test_argbest_is_stable() {
		let v = [3.0, 1.0, 4.0, 1.0, 4.0];
		assert_eq!(argbest(v, Direction::Minimize), Some((1, 1.0)));
		assert_eq!(argbest(v, Direction::Maximize), Some((2, 4.0)));
		assert_eq!(argbest(Vec::<f64>::new(), Direction::Minimize), None);
	}

	#[test]
	fn test_validate_rejects_bad_settings() {
		assert!(PsoConfig::default().validate().is_ok());
		let bad = [
			PsoConfigBuilder::new().num_particles(0).build(),
			PsoConfigBuilder::new().inertia(f64::NAN).build(),
			PsoConfigBuilder::new().social(f64::INFINITY).build(),
			PsoConfigBuilder::new().velocity_range(-1.0).build(),
			PsoConfigBuilder::new().velocity_range(f64::MAX).build(),
			PsoConfigBuilder::new().velocity_clamp(0.0).build(),
			PsoConfigBuilder::new().enable_parallel(true).parallel_threads(0).build(),
		];
		for cfg in bad {
			assert_eq!(cfg.validate().unwrap_err().kind(), ErrorKind::InvalidConfig, "{cfg:?}");
		}
	}
}
