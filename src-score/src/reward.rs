use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::ScoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardMetric {
    pub name: String,
    pub weight: f64,
    /// Default search range when no dataset supplies one
    pub min: f64,
    pub max: f64,
}

/// Weighted sum of raw metric values. Higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearReward {
    pub metrics: Vec<RewardMetric>,
}

impl LinearReward {
    /// Activity reward weighted by each metric's correlation with the mean
    pub fn correlation_with_mean() -> Self {
        let table = [
            ("commits", 0.11, 100_000.0),
            ("contributors", 0.08, 10_000.0),
            ("open_pr", 0.17, 100_000.0),
            ("closed_pr", 0.06, 100_000.0),
            ("merged_pr", 0.11, 100_000.0),
            ("open_issue", 0.14, 50_000.0),
            ("closed_issue", 0.19, 50_000.0),
            ("stars", 0.08, 500_000.0),
            ("fork", 0.10, 500_000.0),
        ];
        Self {
            metrics: table
                .iter()
                .map(|&(name, weight, max)| RewardMetric {
                    name: name.to_string(),
                    weight,
                    min: 0.0,
                    max,
                })
                .collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.metrics.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.name.clone()).collect()
    }

    pub fn default_bounds(&self) -> Vec<(f64, f64)> {
        self.metrics.iter().map(|m| (m.min, m.max)).collect()
    }

    pub fn reward(&self, x: &Array1<f64>) -> Result<f64, ScoreError> {
        if x.len() != self.metrics.len() {
            return Err(ScoreError::DimensionMismatch {
                expected: self.metrics.len(),
                found: x.len(),
            });
        }
        Ok(self.metrics.iter().zip(x.iter()).map(|(m, &v)| m.weight * v).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_correlation_with_mean_weights() {
        let r = LinearReward::correlation_with_mean();
        assert_eq!(r.dim(), 9);
        let total: f64 = r.metrics.iter().map(|m| m.weight).sum();
        assert!((total - 1.04).abs() < 1e-12);
        assert_eq!(r.default_bounds()[5], (0.0, 50_000.0));
        assert_eq!(r.names()[8], "fork");
    }

    #[test]
    fn test_reward_is_linear() {
        let r = LinearReward::correlation_with_mean();
        let mut x = Array1::zeros(9);
        assert_eq!(r.reward(&x).unwrap(), 0.0);
        x[6] = 100.0;
        assert!((r.reward(&x).unwrap() - 19.0).abs() < 1e-12);
    }

    #[test]
    fn test_reward_dimension_mismatch() {
        let r = LinearReward::correlation_with_mean();
        assert!(matches!(
            r.reward(&array![1.0, 2.0]),
            Err(ScoreError::DimensionMismatch { expected: 9, found: 2 })
        ));
    }
}
