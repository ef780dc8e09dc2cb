//! Deterministic method recommender (§4.6): a pure lookup from a spec (and,
//! optionally, an in-flight diagnostics snapshot) to the method that should
//! handle it. Reason strings are part of the stable contract — callers may
//! match on them.

use cs_types::{DiagnosticsSnapshot, GuaranteeTier, Kind, Recommendation};

/// Recommend a one-sample method for `spec`, optionally informed by a
/// diagnostics snapshot from a CS/e-process already running over the same
/// stream (e.g. to fall back off Empirical-Bernstein once drift has
/// latched).
pub fn recommend_cs(
    spec: &cs_types::StreamSpec,
    diagnostics: Option<&DiagnosticsSnapshot>,
) -> Recommendation {
    match spec.kind {
        Kind::Bernoulli => Recommendation {
            method: "BernoulliMixtureCS".to_string(),
            reason: "kind=bernoulli: the beta-binomial mixture CS is strictly tighter than \
                     Hoeffding/Empirical-Bernstein on 0/1 data."
                .to_string(),
            tier_expected: GuaranteeTier::Guaranteed,
        },
        Kind::Bounded => {
            let drifted = diagnostics.is_some_and(|d| d.drift_detected);
            if drifted {
                Recommendation {
                    method: "HoeffdingCS".to_string(),
                    reason: "kind=bounded, drift detected: falling back to the distribution-free \
                             Hoeffding bound, which does not rely on a stable running variance."
                        .to_string(),
                    tier_expected: GuaranteeTier::Diagnostic,
                }
            } else {
                Recommendation {
                    method: "EmpiricalBernsteinCS".to_string(),
                    reason: "kind=bounded, no drift detected: the variance-adaptive \
                             Empirical-Bernstein bound is tighter than Hoeffding once the \
                             running variance has stabilized."
                        .to_string(),
                    tier_expected: GuaranteeTier::Guaranteed,
                }
            }
        }
    }
}

/// Recommend a two-sample method for `spec`. Method names follow §4.6's
/// table exactly (`TwoSampleHoeffdingCS`, `TwoSampleEmpiricalBernsteinCS`):
/// a flat name per union-of-one-sample-CS variant, not a generic-looking
/// wrapper around the one-sample method name.
pub fn recommend_ab(
    spec: &cs_types::ABSpec,
    diagnostics: Option<&DiagnosticsSnapshot>,
) -> Recommendation {
    match spec.kind {
        Kind::Bernoulli => Recommendation {
            method: "TwoSampleHoeffdingCS".to_string(),
            reason: "kind=bernoulli: union two per-arm Hoeffding CS (the union-of-Bernoulli \
                     variant) at 1 - alpha/2 each into a Minkowski-difference interval for \
                     Delta."
                .to_string(),
            tier_expected: GuaranteeTier::Guaranteed,
        },
        Kind::Bounded => {
            let drifted = diagnostics.is_some_and(|d| d.drift_detected);
            if drifted {
                Recommendation {
                    method: "TwoSampleHoeffdingCS".to_string(),
                    reason: "kind=bounded, drift detected: union two per-arm Hoeffding CS \
                             rather than Empirical-Bernstein, which assumes a settled variance."
                        .to_string(),
                    tier_expected: GuaranteeTier::Diagnostic,
                }
            } else {
                Recommendation {
                    method: "TwoSampleEmpiricalBernsteinCS".to_string(),
                    reason: "kind=bounded, no drift detected: union two per-arm \
                             Empirical-Bernstein CS at 1 - alpha/2 each into a \
                             Minkowski-difference interval for Delta."
                        .to_string(),
                    tier_expected: GuaranteeTier::Guaranteed,
                }
            }
        }
    }
}
