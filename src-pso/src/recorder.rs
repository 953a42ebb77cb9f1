use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::{CallbackAction, Direction, PsoIntermediate};

/// Errors raised while saving records
#[derive(Error, Debug)]
pub enum RecordError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),
}

/// Records optimization progress and swarm motion via PSO callbacks
#[derive(Debug)]
pub struct OptimizationRecorder {
	/// Function name (used for CSV filenames)
	function_name: String,
	direction: Direction,
	records: Arc<Mutex<Vec<OptimizationRecord>>>,
	snapshots: Arc<Mutex<Vec<SwarmSnapshot>>>,
	/// Best function value seen so far
	best_value: Arc<Mutex<Option<f64>>>,
}

/// A single optimization iteration record
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRecord {
	pub iteration: usize,
	/// Best x found so far
	pub x: Vec<f64>,
	/// Best function result so far
	pub best_result: f64,
	/// Standard deviation of the personal-best values
	pub spread: f64,
	/// Whether this iteration improved the best known result
	pub is_improvement: bool,
}

/// Particle positions at one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmSnapshot {
	pub iteration: usize,
	/// One entry per particle
	pub positions: Vec<Vec<f64>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
	m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OptimizationRecorder {
	/// Create a new recorder for a minimization run
	pub fn new(function_name: String) -> Self {
		Self::with_direction(function_name, Direction::Minimize)
	}

	/// Create a recorder judging improvements under `direction`
	pub fn with_direction(function_name: String, direction: Direction) -> Self {
		Self {
			function_name,
			direction,
			records: Arc::new(Mutex::new(Vec::new())),
			snapshots: Arc::new(Mutex::new(Vec::new())),
			best_value: Arc::new(Mutex::new(None)),
		}
	}

	pub fn function_name(&self) -> &str {
		&self.function_name
	}

	/// Create a callback function that records optimization progress
	pub fn create_callback(&self) -> Box<dyn FnMut(&PsoIntermediate) -> CallbackAction + Send> {
		let records = self.records.clone();
		let snapshots = self.snapshots.clone();
		let best_value = self.best_value.clone();
		let direction = self.direction;

		Box::new(move |intermediate: &PsoIntermediate| -> CallbackAction {
			let mut best_guard = lock(&best_value);
			let is_improvement = match *best_guard {
				Some(best) => direction.is_better(intermediate.fun, best),
				None => true,
			};
			if is_improvement {
				*best_guard = Some(intermediate.fun);
			}
			drop(best_guard);

			lock(&records).push(OptimizationRecord {
				iteration: intermediate.iter,
				x: intermediate.x.to_vec(),
				best_result: intermediate.fun,
				spread: intermediate.spread,
				is_improvement,
			});
			lock(&snapshots).push(SwarmSnapshot {
				iteration: intermediate.iter,
				positions: intermediate.positions.rows().into_iter().map(|r| r.to_vec()).collect(),
			});

			CallbackAction::Continue
		})
	}

	/// Save the per-iteration best to `<output_dir>/<function_name>.csv`
	///
	/// Columns: `iteration,x0..xn,best_result,spread,is_improvement`.
	pub fn save_to_csv(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf, RecordError> {
		create_dir_all(output_dir.as_ref())?;
		let filename = output_dir.as_ref().join(format!("{}.csv", self.function_name));

		let records_guard = lock(&self.records);
		let mut wtr = csv::Writer::from_path(&filename)?;
		if let Some(first) = records_guard.first() {
			let mut header = vec!["iteration".to_string()];
			header.extend((0..first.x.len()).map(|i| format!("x{}", i)));
			header.extend(["best_result", "spread", "is_improvement"].map(String::from));
			wtr.write_record(&header)?;
		}
		for record in records_guard.iter() {
			let mut row = vec![record.iteration.to_string()];
			row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
			row.push(format!("{:.16}", record.best_result));
			row.push(format!("{:.16}", record.spread));
			row.push(record.is_improvement.to_string());
			wtr.write_record(&row)?;
		}
		wtr.flush()?;
		Ok(filename)
	}

	/// Save every particle position to `<output_dir>/<function_name>_swarm.csv`
	///
	/// Columns: `iteration,particle,x0..xn`; one row per particle per iteration.
	pub fn save_motion_csv(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf, RecordError> {
		create_dir_all(output_dir.as_ref())?;
		let filename = output_dir.as_ref().join(format!("{}_swarm.csv", self.function_name));

		let snapshots_guard = lock(&self.snapshots);
		let mut wtr = csv::Writer::from_path(&filename)?;
		let dim = snapshots_guard
			.first()
			.and_then(|s| s.positions.first())
			.map(|p| p.len());
		if let Some(dim) = dim {
			let mut header = vec!["iteration".to_string(), "particle".to_string()];
			header.extend((0..dim).map(|i| format!("x{}", i)));
			wtr.write_record(&header)?;
		}
		for snapshot in snapshots_guard.iter() {
			for (p, position) in snapshot.positions.iter().enumerate() {
				let mut row = vec![snapshot.iteration.to_string(), p.to_string()];
				row.extend(position.iter().map(|xi| format!("{:.16}", xi)));
				wtr.write_record(&row)?;
			}
		}
		wtr.flush()?;
		Ok(filename)
	}

	/// Get a copy of all recorded iterations
	pub fn get_records(&self) -> Vec<OptimizationRecord> {
		lock(&self.records).clone()
	}

	/// Get a copy of all recorded swarm snapshots
	pub fn get_snapshots(&self) -> Vec<SwarmSnapshot> {
		lock(&self.snapshots).clone()
	}

	pub fn num_iterations(&self) -> usize {
		lock(&self.records).len()
	}

	pub fn clear(&self) {
		lock(&self.records).clear();
		lock(&self.snapshots).clear();
		*lock(&self.best_value) = None;
	}

	/// Get the final best solution if any iterations were recorded
	pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
		lock(&self.records).last().map(|r| (r.x.clone(), r.best_result))
	}
}
