//! Recording wrapper for particle swarm runs

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::recorder::{OptimizationRecorder, RecordError};
use crate::{
	CallbackAction, Objective, PsoConfig, PsoError, PsoIntermediate, PsoReport, particle_swarm,
};

#[derive(Error, Debug)]
pub enum RecordedRunError {
	#[error(transparent)]
	Pso(#[from] PsoError),

	#[error("failed to save records: {0}")]
	Record(#[from] RecordError),
}

/// CSV files written by [`run_recorded_particle_swarm`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPaths {
	/// Per-iteration global best
	pub history: PathBuf,
	/// Per-iteration particle positions
	pub motion: PathBuf,
}

/// Run a particle swarm with per-iteration recording to CSV.
///
/// A callback already present in `config` still runs after the recorder and
/// may stop the run.
pub fn run_recorded_particle_swarm<F>(
	function_name: &str,
	objective: &F,
	bounds: &[(f64, f64)],
	mut config: PsoConfig,
	output_dir: impl AsRef<Path>,
) -> Result<(PsoReport, RecordedPaths), RecordedRunError>
where
	F: Objective + ?Sized,
{
	let recorder =
		OptimizationRecorder::with_direction(function_name.to_string(), config.direction);
	let mut record = recorder.create_callback();
	let mut user = config.callback.take();
	config.callback = Some(Box::new(move |intermediate: &PsoIntermediate| {
		record(intermediate);
		match user.as_mut() {
			Some(cb) => cb(intermediate),
			None => CallbackAction::Continue,
		}
	}));

	let report = particle_swarm(objective, bounds, config)?;

	let history = recorder.save_to_csv(output_dir.as_ref())?;
	let motion = recorder.save_motion_csv(output_dir.as_ref())?;
	log::info!("Recorded {} iterations to {}", recorder.num_iterations(), history.display());

	Ok((report, RecordedPaths { history, motion }))
}
