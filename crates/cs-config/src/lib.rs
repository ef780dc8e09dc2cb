//! Configuration loading for the confidence-sequence engine.
//!
//! Loads `StreamSpec`/`ABSpec`/atlas `Scenario` batches from YAML, with a
//! resolution order of explicit path → environment variable → default
//! (`resolve`), and semantic validation kept separate from deserialization
//! (`validate`).

pub mod resolve;
pub mod scenario;
pub mod validate;

pub use resolve::{resolve_path, ConfigSource, ResolvedPath};
pub use scenario::{load_scenarios, parse_scenarios};

use cs_types::{ABSpec, Result, StreamSpec};
use std::path::Path;

/// Environment variable consulted for a `StreamSpec` YAML path when no
/// explicit path is given.
pub const ENV_STREAM_SPEC: &str = "CS_STREAM_SPEC";

/// Environment variable consulted for an `ABSpec` YAML path when no
/// explicit path is given.
pub const ENV_AB_SPEC: &str = "CS_AB_SPEC";

/// Environment variable consulted for an atlas scenario batch YAML path
/// when no explicit path is given.
pub const ENV_ATLAS_SCENARIOS: &str = "CS_ATLAS_SCENARIOS";

/// Load and validate a `StreamSpec` from a YAML file at `path`.
pub fn load_stream_spec(path: &Path) -> Result<StreamSpec> {
    let contents = std::fs::read_to_string(path)?;
    parse_stream_spec(&contents)
}

/// Parse and validate a `StreamSpec` from an in-memory YAML string.
pub fn parse_stream_spec(yaml: &str) -> Result<StreamSpec> {
    let spec: StreamSpec = serde_yaml::from_str(yaml)?;
    validate::validate_stream_spec(&spec)?;
    Ok(spec)
}

/// Load and validate an `ABSpec` from a YAML file at `path`.
pub fn load_ab_spec(path: &Path) -> Result<ABSpec> {
    let contents = std::fs::read_to_string(path)?;
    parse_ab_spec(&contents)
}

/// Parse and validate an `ABSpec` from an in-memory YAML string.
pub fn parse_ab_spec(yaml: &str) -> Result<ABSpec> {
    let spec: ABSpec = serde_yaml::from_str(yaml)?;
    validate::validate_ab_spec(&spec)?;
    Ok(spec)
}
