use ndarray::Array1;
use swarmrank_pso::{Direction, Fallible, PsoConfig, PsoReport, particle_swarm};

use crate::{LinearReward, Optimum, ScoreError, ScoringProfile};

fn optimum(
    objective: &str,
    metrics: Vec<String>,
    direction: Direction,
    report: PsoReport,
) -> Optimum {
    Optimum {
        objective: objective.to_string(),
        direction,
        metrics,
        position: report.x.to_vec(),
        value: report.fun,
        iterations: report.nit,
        evaluations: report.nfev,
    }
}

/// Search the profile's raw ranges for the point of minimum distance.
///
/// The run always minimizes, whatever `config.direction` says.
pub fn find_ideal_profile(
    profile: &ScoringProfile,
    mut config: PsoConfig,
) -> Result<Optimum, ScoreError> {
    profile.validate()?;
    config.direction = Direction::Minimize;
    let objective = Fallible(|x: &Array1<f64>| profile.distance(x));
    let report = particle_swarm(&objective, &profile.bounds(), config)?;
    log::info!("Ideal profile distance {:.6e} after {} iterations", report.fun, report.nit);
    Ok(optimum("profile_distance", profile.names(), Direction::Minimize, report))
}

/// Search `bounds` for the maximum of `reward`. The run always maximizes.
pub fn find_max_reward(
    reward: &LinearReward,
    bounds: &[(f64, f64)],
    mut config: PsoConfig,
) -> Result<Optimum, ScoreError> {
    if bounds.len() != reward.dim() {
        return Err(ScoreError::DimensionMismatch { expected: reward.dim(), found: bounds.len() });
    }
    config.direction = Direction::Maximize;
    let objective = Fallible(|x: &Array1<f64>| reward.reward(x));
    let report = particle_swarm(&objective, bounds, config)?;
    log::info!("Best reward {:.6e} after {} iterations", report.fun, report.nit);
    Ok(optimum("linear_reward", reward.names(), Direction::Maximize, report))
}
