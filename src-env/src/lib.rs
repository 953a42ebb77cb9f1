//! Environment helpers shared by the SwarmRank crates

pub mod constants;
pub mod env_utils;

pub use env_utils::{EnvError, get_data_generated_dir, get_records_dir, get_swarmrank_dir};
