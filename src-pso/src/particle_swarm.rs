use ndarray::Array1;

use crate::{Bounds, Objective, ParticleSwarm, PsoConfig, PsoError, PsoReport};

/// Convenience function in the shape of SciPy-style global optimizers:
/// - `objective`: maps x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs
/// - `config`: PSO configuration
pub fn particle_swarm<F>(
	objective: &F,
	bounds: &[(f64, f64)],
	config: PsoConfig,
) -> Result<PsoReport, PsoError>
where
	F: Objective + ?Sized,
{
	let bounds = Bounds::new(bounds)?;
	ParticleSwarm::new(objective, bounds).with_config(config).solve()
}

/// Find the best position of `objective` in a `dim`-dimensional box.
///
/// Returns `(position, value)`. Bounds are validated against `dim` before any
/// particle is built or the objective is called.
pub fn optimize<F>(
	dim: usize,
	bounds: &[(f64, f64)],
	objective: &F,
	config: PsoConfig,
) -> Result<(Array1<f64>, f64), PsoError>
where
	F: Objective + ?Sized,
{
	if dim == 0 {
		return Err(PsoError::InvalidConfig("dimension must be positive".into()));
	}
	let bounds = Bounds::with_dim(dim, bounds)?;
	let report = ParticleSwarm::new(objective, bounds).with_config(config).solve()?;
	Ok((report.x, report.fun))
}
