/// Environment variable pointing at the project root
pub const SWARMRANK_DIR_VAR: &str = "SWARMRANK_DIR";

/// Directory (under the project root) for generated artefacts
pub const DATA_GENERATED: &str = "data_generated";

/// Subdirectory of [`DATA_GENERATED`] for optimization records
pub const RECORDS: &str = "records";
