//! Semantic validation, kept separate from deserialization.
//!
//! `serde_yaml` populates a `StreamSpec`/`ABSpec`/`Scenario` field-by-field
//! without running the constructors in `cs_types::spec`, so a file can
//! deserialize successfully yet describe an invalid spec (e.g.
//! `alpha = 1.5`). Every loader in this crate calls one of these functions
//! immediately after deserializing, before handing the value to a caller.

use cs_types::{ABSpec, Error, Result, Scenario, StreamSpec};

/// Validate a deserialized `StreamSpec`.
pub fn validate_stream_spec(spec: &StreamSpec) -> Result<()> {
    spec.validate()
}

/// Validate a deserialized `ABSpec`.
pub fn validate_ab_spec(spec: &ABSpec) -> Result<()> {
    spec.validate()
}

/// Validate a deserialized atlas `Scenario`.
pub fn validate_scenario(scenario: &Scenario) -> Result<()> {
    scenario.validate()
}

/// Validate a batch of atlas scenarios, short-circuiting on the first
/// invalid entry and naming it in the error.
pub fn validate_scenarios(scenarios: &[Scenario]) -> Result<()> {
    for scenario in scenarios {
        validate_scenario(scenario).map_err(|e| {
            Error::Schema(format!("scenario \"{}\": {e}", scenario.name))
        })?;
    }
    Ok(())
}
