use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_all;
use crate::{Sample, ScoreError, ScoringProfile};

/// One row of a ranking; rank 1 is the closest sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSample {
    pub rank: usize,
    pub name: String,
    pub distance: f64,
    pub values: Vec<f64>,
}

fn ranked(samples: &[Sample], distances: Vec<f64>) -> Vec<RankedSample> {
    let mut order: Vec<usize> = (0..samples.len()).collect();
    // sort_by is stable: equal distances keep input order
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order
        .into_iter()
        .enumerate()
        .map(|(pos, i)| RankedSample {
            rank: pos + 1,
            name: samples[i].name.clone(),
            distance: distances[i],
            values: samples[i].values.to_vec(),
        })
        .collect()
}

/// Order samples by Euclidean distance to `optimum`, both normalized by `ranges`
pub fn rank_by_distance(
    samples: &[Sample],
    optimum: &Array1<f64>,
    ranges: &[(f64, f64)],
) -> Result<Vec<RankedSample>, ScoreError> {
    if optimum.len() != ranges.len() {
        return Err(ScoreError::DimensionMismatch { expected: ranges.len(), found: optimum.len() });
    }
    let target = normalize_all(optimum, ranges);
    let distances = samples
        .iter()
        .map(|s| {
            if s.values.len() != ranges.len() {
                return Err(ScoreError::DimensionMismatch {
                    expected: ranges.len(),
                    found: s.values.len(),
                });
            }
            let diff = normalize_all(&s.values, ranges) - &target;
            Ok(diff.dot(&diff).sqrt())
        })
        .collect::<Result<Vec<f64>, ScoreError>>()?;
    Ok(ranked(samples, distances))
}

/// Order samples by their distance to the ideal profile
pub fn rank_by_score(
    samples: &[Sample],
    profile: &ScoringProfile,
) -> Result<Vec<RankedSample>, ScoreError> {
    let distances = samples
        .iter()
        .map(|s| profile.distance(&s.values))
        .collect::<Result<Vec<f64>, ScoreError>>()?;
    Ok(ranked(samples, distances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricSpec;
    use ndarray::array;

    fn samples() -> Vec<Sample> {
        vec![
            Sample { name: "far".into(), values: array![0.0, 0.0] },
            Sample { name: "near".into(), values: array![9.0, 90.0] },
            Sample { name: "tie".into(), values: array![10.0, 80.0] },
            Sample { name: "tie2".into(), values: array![10.0, 80.0] },
        ]
    }

    #[test]
    fn test_rank_by_distance() {
        let ranges = [(0.0, 10.0), (0.0, 100.0)];
        let ranking = rank_by_distance(&samples(), &array![10.0, 100.0], &ranges).unwrap();
        let names: Vec<&str> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["near", "tie", "tie2", "far"]);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[3].rank, 4);
        assert!((ranking[3].distance - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(ranking[1].distance, ranking[2].distance);
    }

    #[test]
    fn test_rank_by_distance_dimension_mismatch() {
        let err =
            rank_by_distance(&samples(), &array![1.0], &[(0.0, 1.0), (0.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ScoreError::DimensionMismatch { expected: 2, found: 1 }));
    }

    #[test]
    fn test_rank_by_score() {
        let profile = ScoringProfile::new(vec![
            MetricSpec::new("a", 0.0, 10.0, 0.0, 1.0),
            MetricSpec::new("b", 0.0, 100.0, 0.0, 1.0),
        ])
        .unwrap();
        let ranking = rank_by_score(&samples(), &profile).unwrap();
        let names: Vec<&str> = ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["far", "near", "tie", "tie2"]);
        assert_eq!(ranking[0].distance, 0.0);
    }
}
