//! SwarmRank scoring: turn repository metrics into rankings
//!
//! - `normalize`: map raw metric values into [0, 1]
//! - `profile`: weighted distance to an ideal metric profile
//! - `reward`: linear reward over raw metrics
//! - `dataset`: load repository records and extract metric samples
//! - `rank`: order samples by distance
//! - `output`: persist rankings as JSON and CSV
//! - `search`: find the ideal profile or the reward maximum

pub use swarmrank_pso as pso;

/// Error type shared by the scoring modules
pub mod error;
/// Metric normalization helpers
pub mod normalize;
/// Ideal-profile scoring
pub mod profile;
/// Linear reward objective
pub mod reward;
/// Repository records and metric samples
pub mod dataset;
/// Ranking by distance
pub mod rank;
/// JSON and CSV persistence
pub mod output;
/// Particle swarm searches over profiles and rewards
pub mod search;

pub use dataset::{RepoRecord, Sample, extract_samples, load_records, metric_ranges};
pub use error::ScoreError;
pub use normalize::{normalize, normalize_all};
pub use output::{Optimum, save_optimum_json, save_ranking_csv, save_ranking_json};
pub use profile::{MetricSpec, ScoringProfile};
pub use rank::{RankedSample, rank_by_distance, rank_by_score};
pub use reward::{LinearReward, RewardMetric};
pub use search::{find_ideal_profile, find_max_reward};
