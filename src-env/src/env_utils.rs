//! Environment variable utilities for SwarmRank
//!
//! Output locations hang off the SWARMRANK_DIR variable, which points to the
//! project root.

use crate::constants::{DATA_GENERATED, RECORDS, SWARMRANK_DIR_VAR};
use std::env;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "SWARMRANK_DIR environment variable is not set. Please set it to the project root directory (e.g., export SWARMRANK_DIR=/path/to/swarmrank)"
    )]
    DirNotSet,

    #[error("SWARMRANK_DIR points to a non-existent directory: {0}")]
    DirNotFound(PathBuf),

    #[error("Failed to create data_generated directory: {0}")]
    DataGeneratedCreationFailed(std::io::Error),
}

/// Get the SWARMRANK_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if SWARMRANK_DIR is unset or points to a missing path.
///
/// # Example
///
/// ```no_run
/// use swarmrank_env::env_utils::get_swarmrank_dir;
///
/// let root = get_swarmrank_dir()?;
/// println!("Project directory: {}", root.display());
/// # Ok::<(), swarmrank_env::env_utils::EnvError>(())
/// ```
pub fn get_swarmrank_dir() -> Result<PathBuf, EnvError> {
    let root = env::var(SWARMRANK_DIR_VAR).map_err(|_| EnvError::DirNotSet)?;
    let path = PathBuf::from(root);
    if !path.exists() {
        return Err(EnvError::DirNotFound(path));
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<(), EnvError> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(EnvError::DataGeneratedCreationFailed)?;
    }
    Ok(())
}

/// Get the path to the data_generated directory, creating it if necessary
pub fn get_data_generated_dir() -> Result<PathBuf, EnvError> {
    let data_generated = get_swarmrank_dir()?.join(DATA_GENERATED);
    ensure_dir(&data_generated)?;
    Ok(data_generated)
}

/// Get the path to data_generated/records, creating it if necessary
///
/// Default destination for optimization history and swarm motion CSVs.
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
    let records_dir = get_data_generated_dir()?.join(RECORDS);
    ensure_dir(&records_dir)?;
    Ok(records_dir)
}
