use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use swarmrank_pso::Direction;

use crate::{RankedSample, ScoreError};

/// Best point found by an optimization run, with metric names attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Optimum {
    pub objective: String,
    pub direction: Direction,
    pub metrics: Vec<String>,
    pub position: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
}

fn create_parent(path: &Path) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| ScoreError::io(parent, e))?;
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ScoreError> {
    create_parent(path)?;
    let file = File::create(path).map_err(|e| ScoreError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(|e| ScoreError::io(path, e))
}

pub fn save_optimum_json(path: impl AsRef<Path>, optimum: &Optimum) -> Result<(), ScoreError> {
    write_json(path.as_ref(), optimum)
}

/// Save a ranking as a pretty-printed JSON array
pub fn save_ranking_json(
    path: impl AsRef<Path>,
    ranking: &[RankedSample],
) -> Result<(), ScoreError> {
    write_json(path.as_ref(), ranking)
}

/// Save a ranking as CSV with columns `rank,name,distance,<metric_names...>`
pub fn save_ranking_csv(
    path: impl AsRef<Path>,
    ranking: &[RankedSample],
    metric_names: &[String],
) -> Result<(), ScoreError> {
    let path = path.as_ref();
    create_parent(path)?;
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec!["rank".to_string(), "name".to_string(), "distance".to_string()];
    header.extend(metric_names.iter().cloned());
    wtr.write_record(&header)?;
    for row in ranking {
        if row.values.len() != metric_names.len() {
            return Err(ScoreError::DimensionMismatch {
                expected: metric_names.len(),
                found: row.values.len(),
            });
        }
        let mut record = vec![row.rank.to_string(), row.name.clone(), row.distance.to_string()];
        record.extend(row.values.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush().map_err(|e| ScoreError::io(path, e))?;
    Ok(())
}
