use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::ScoreError;
use crate::normalize::normalize;

/// One metric of an ideal profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    /// Lower end of the plausible raw range
    pub min: f64,
    /// Upper end of the plausible raw range
    pub max: f64,
    /// Ideal normalized value, in [0, 1]
    pub center: f64,
    /// Relative importance in the distance
    pub weight: f64,
}

impl MetricSpec {
    pub fn new(name: &str, min: f64, max: f64, center: f64, weight: f64) -> Self {
        Self { name: name.to_string(), min, max, center, weight }
    }
}

/// Ideal metric profile. A lower distance means a closer match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    pub metrics: Vec<MetricSpec>,
}

impl ScoringProfile {
    pub fn new(metrics: Vec<MetricSpec>) -> Result<Self, ScoreError> {
        let profile = Self { metrics };
        profile.validate()?;
        Ok(profile)
    }

    /// Built-in repository health profile over seven contribution metrics
    pub fn repo_health() -> Self {
        Self {
            metrics: vec![
                MetricSpec::new("unique_contributors_count", 1.0, 5000.0, 0.75, 1.5),
                MetricSpec::new("median_contributions_per_contributor", 1.0, 500.0, 0.65, 1.0),
                MetricSpec::new("mean_contributions_per_contributor", 1.0, 1000.0, 0.55, 1.0),
                // 0 is perfect equality, 1 perfect inequality
                MetricSpec::new("contribution_gini_coefficient", 0.0, 1.0, 0.25, 2.0),
                MetricSpec::new("total_annual_commits", 1.0, 50000.0, 0.65, 1.0),
                MetricSpec::new("average_weekly_commits", 0.02, 1000.0, 0.55, 1.0),
                MetricSpec::new("commit_consistency", 0.0, 10.0, 0.35, 1.3),
            ],
        }
    }

    /// Load a profile from a JSON file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScoreError::io(path, e))?;
        let profile: ScoringProfile = serde_json::from_reader(BufReader::new(file))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.metrics.is_empty() {
            return Err(ScoreError::InvalidProfile("profile has no metrics".into()));
        }
        for m in &self.metrics {
            if !(m.min.is_finite() && m.max.is_finite()) || m.min > m.max {
                return Err(ScoreError::InvalidProfile(format!(
                    "{}: invalid range [{}, {}]",
                    m.name, m.min, m.max
                )));
            }
            if !(0.0..=1.0).contains(&m.center) {
                return Err(ScoreError::InvalidProfile(format!(
                    "{}: center {} outside [0, 1]",
                    m.name, m.center
                )));
            }
            if !(m.weight.is_finite() && m.weight >= 0.0) {
                return Err(ScoreError::InvalidProfile(format!(
                    "{}: weight must be finite and non-negative, got {}",
                    m.name, m.weight
                )));
            }
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.metrics.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.name.clone()).collect()
    }

    /// Raw `(min, max)` per metric, usable as search bounds
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.metrics.iter().map(|m| (m.min, m.max)).collect()
    }

    /// Weighted Euclidean distance between normalized `params` and the centers
    pub fn distance(&self, params: &Array1<f64>) -> Result<f64, ScoreError> {
        if params.len() != self.metrics.len() {
            return Err(ScoreError::DimensionMismatch {
                expected: self.metrics.len(),
                found: params.len(),
            });
        }
        let sum: f64 = self
            .metrics
            .iter()
            .zip(params.iter())
            .map(|(m, &p)| m.weight * (normalize(p, m.min, m.max) - m.center).powi(2))
            .sum();
        Ok(sum.sqrt())
    }
}
