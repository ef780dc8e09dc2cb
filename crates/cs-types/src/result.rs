//! Immutable result records returned by every CS/e-process snapshot (§3).

use crate::tier::GuaranteeTier;
use cs_math::bayes_factor::EvidenceSummary;
use serde::{Deserialize, Serialize};

/// A read-only snapshot of an inference instance's diagnostics, attached to
/// every `Interval`/`EValue` it produces (§4.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSnapshot {
    /// Name of the method that produced this snapshot, e.g. `"HoeffdingCS"`.
    pub method: String,
    /// Observations replaced via `clip(x, a, b)` under `clip_mode=clip`.
    pub clipped_count: u64,
    /// `NaN`/not-a-number inputs skipped before reaching the estimator.
    pub missing_count: u64,
    /// Observations that fell outside `[a, b]`, whether clipped or raised.
    pub out_of_range_count: u64,
    /// Whether the CUSUM-lite drift heuristic has latched (§4.2).
    pub drift_detected: bool,
    /// Free-form assumption notes (e.g. which gate downgraded the tier).
    pub notes: Vec<String>,
}

impl DiagnosticsSnapshot {
    /// A pristine snapshot for a freshly constructed or just-`reset()`
    /// instance.
    pub fn fresh(method: impl Into<String>) -> Self {
        DiagnosticsSnapshot {
            method: method.into(),
            clipped_count: 0,
            missing_count: 0,
            out_of_range_count: 0,
            drift_detected: false,
            notes: Vec::new(),
        }
    }
}

/// A time-uniform interval estimate at observation count `t` (§3, §4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub t: u64,
    pub estimate: f64,
    pub lo: f64,
    pub hi: f64,
    pub tier: GuaranteeTier,
    pub alpha: f64,
    pub diagnostics: DiagnosticsSnapshot,
}

impl Interval {
    /// `hi - lo`, always `>= 0`.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// `true` if `theta` lies within `[lo, hi]` (inclusive).
    pub fn contains(&self, theta: f64) -> bool {
        theta >= self.lo && theta <= self.hi
    }
}

/// A sequential e-value snapshot at observation count `t` (§3, §4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EValue {
    pub t: u64,
    /// The e-value itself, exponentiated and clamped for display/storage.
    pub e: f64,
    /// `log(e)`, the quantity actually compared against `log(1/alpha)`.
    pub log_e: f64,
    /// `true` iff `e >= 1/alpha` has ever been observed on this instance
    /// (latches; see §4.5).
    pub decision: bool,
    pub tier: GuaranteeTier,
    pub alpha: f64,
    pub diagnostics: DiagnosticsSnapshot,
    /// Presentation-only summary of `log_e` on the Jeffreys scale. Carries
    /// no invariant of its own (§3).
    pub evidence: EvidenceSummary,
}

/// Deterministic method recommendation returned by `recommend_cs`/
/// `recommend_ab` (§4.6). Reason strings are part of the stable contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub method: String,
    pub reason: String,
    pub tier_expected: GuaranteeTier,
}
