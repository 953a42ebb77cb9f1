use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ScoreError;

/// One repository as collected: its name plus arbitrary metric fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub full_name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RepoRecord {
    /// Numeric value of `metric`, if present
    pub fn metric(&self, metric: &str) -> Option<f64> {
        self.fields.get(metric).and_then(Value::as_f64)
    }
}

/// Metric values of one repository, ordered like the metric names used to
/// extract them
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub values: Array1<f64>,
}

/// Read a JSON array of repository records
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RepoRecord>, ScoreError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScoreError::io(path, e))?;
    let records: Vec<RepoRecord> = serde_json::from_reader(BufReader::new(file))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Keep the records that carry every metric as a finite number
pub fn extract_samples(records: &[RepoRecord], metric_names: &[String]) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(records.len());
    for record in records {
        let values: Option<Vec<f64>> = metric_names
            .iter()
            .map(|m| record.metric(m).filter(|v| v.is_finite()))
            .collect();
        match values {
            Some(values) => samples.push(Sample {
                name: record.full_name.clone(),
                values: Array1::from(values),
            }),
            None => {
                let missing: Vec<&str> = metric_names
                    .iter()
                    .filter(|m| record.metric(m).is_none_or(|v| !v.is_finite()))
                    .map(String::as_str)
                    .collect();
                log::warn!("Skipping {}: missing {}", record.full_name, missing.join(", "));
            }
        }
    }
    samples
}

/// Observed `(min, max)` of each metric across `samples`
pub fn metric_ranges(samples: &[Sample]) -> Result<Vec<(f64, f64)>, ScoreError> {
    let first = samples.first().ok_or(ScoreError::EmptyDataset)?;
    let mut ranges: Vec<(f64, f64)> = first.values.iter().map(|&v| (v, v)).collect();
    for sample in &samples[1..] {
        if sample.values.len() != ranges.len() {
            return Err(ScoreError::DimensionMismatch {
                expected: ranges.len(),
                found: sample.values.len(),
            });
        }
        for (range, &v) in ranges.iter_mut().zip(sample.values.iter()) {
            range.0 = range.0.min(v);
            range.1 = range.1.max(v);
        }
    }
    Ok(ranges)
}
