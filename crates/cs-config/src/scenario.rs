//! Atlas scenario batch loading.

use crate::validate::validate_scenarios;
use cs_types::{Result, Scenario};
use std::path::Path;

/// Load a batch of atlas scenarios from a YAML file containing a top-level
/// sequence of scenario records, validating every entry before returning.
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let contents = std::fs::read_to_string(path)?;
    let scenarios: Vec<Scenario> = serde_yaml::from_str(&contents)?;
    validate_scenarios(&scenarios)?;
    Ok(scenarios)
}

/// Parse (and validate) a batch of atlas scenarios already held in memory,
/// e.g. embedded in a test or received over a non-file channel.
pub fn parse_scenarios(yaml: &str) -> Result<Vec<Scenario>> {
    let scenarios: Vec<Scenario> = serde_yaml::from_str(yaml)?;
    validate_scenarios(&scenarios)?;
    Ok(scenarios)
}
