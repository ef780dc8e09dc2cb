//! Assumption diagnostics (§4.2): the three gates every observation passes
//! before it reaches an [`crate::estimator::Estimator`], and the tier
//! bookkeeping they drive.
//!
//! Gates run in order: missingness, range/clip, drift. Missingness and
//! drift are soft — they only ever downgrade the tier. Range is soft under
//! `clip_mode=clip` and hard (raises) under `clip_mode=error`.

use cs_types::{ClipMode, DiagnosticsSnapshot, Error, GuaranteeTier, Result, Support};

/// Minimum total observations (applied + missing) before the missingness
/// ratio is trusted enough to downgrade the tier; avoids a single missing
/// value at t=1 reading as "20% missing".
const MISSINGNESS_MIN_OBSERVATIONS: u64 = 20;
const MISSINGNESS_RATIO_THRESHOLD: f64 = 0.2;

/// Minimum applied observations before the CUSUM-lite drift heuristic is
/// evaluated; below this the threshold `(b-a)*sqrt(n)` is too small to be
/// meaningful and would latch on ordinary sampling noise.
const DRIFT_MIN_APPLIED: u64 = 5;

/// Mutable per-instance diagnostics state (§3). Owned exclusively by one
/// CS/e-process instance; reset in lockstep with its estimator(s).
#[derive(Debug, Clone)]
pub struct DiagnosticsState {
    method: String,
    support: Support,
    clip_mode: ClipMode,
    clipped: u64,
    missing: u64,
    out_of_range: u64,
    drift_latched: bool,
    cusum_pos: f64,
    cusum_neg: f64,
    tier: GuaranteeTier,
    notes: Vec<String>,
}

/// Outcome of running an observation through the gates.
pub enum GateOutcome {
    /// The observation was missing (`NaN`); the estimator is not updated.
    Missing,
    /// The observation (possibly clipped) should be folded into the
    /// estimator.
    Apply(f64),
}

impl DiagnosticsState {
    pub fn new(method: impl Into<String>, support: Support, clip_mode: ClipMode) -> Self {
        DiagnosticsState {
            method: method.into(),
            support,
            clip_mode,
            clipped: 0,
            missing: 0,
            out_of_range: 0,
            drift_latched: false,
            cusum_pos: 0.0,
            cusum_neg: 0.0,
            tier: GuaranteeTier::Guaranteed,
            notes: Vec::new(),
        }
    }

    /// Run one observation through missingness and range gates.
    ///
    /// `applied_before` is the estimator's `n()` prior to this call, used
    /// both for the missingness ratio and as `t` in a raised
    /// `AssumptionViolation`. Drift is evaluated separately via
    /// [`DiagnosticsState::observe_drift`] once the caller knows the
    /// running mean the estimator held *before* folding this value in.
    pub fn gate(&mut self, x: f64, applied_before: u64) -> Result<GateOutcome> {
        if x.is_nan() {
            self.missing += 1;
            self.check_missingness(applied_before);
            return Ok(GateOutcome::Missing);
        }

        if self.support.contains(x) {
            return Ok(GateOutcome::Apply(x));
        }

        self.out_of_range += 1;
        match self.clip_mode {
            ClipMode::Error => Err(Error::AssumptionViolation {
                method: self.method.clone(),
                t: applied_before,
                value: x,
                a: self.support.a,
                b: self.support.b,
            }),
            ClipMode::Clip => {
                self.clipped += 1;
                self.tier = self.tier.combine(GuaranteeTier::Clipped);
                self.notes.push(format!(
                    "clipped {x} into [{}, {}] at t={applied_before}",
                    self.support.a, self.support.b
                ));
                Ok(GateOutcome::Apply(self.support.clip(x)))
            }
        }
    }

    /// CUSUM-lite drift heuristic (§4.2), run after the value (possibly
    /// clipped) has been folded into the estimator. `running_mean` and
    /// `applied_after` are the estimator's state *after* this update.
    pub fn observe_drift(&mut self, value: f64, running_mean: f64, applied_after: u64) {
        self.cusum_pos = (self.cusum_pos + (value - running_mean)).max(0.0);
        self.cusum_neg = (self.cusum_neg + (running_mean - value)).max(0.0);

        if self.drift_latched || applied_after < DRIFT_MIN_APPLIED {
            return;
        }
        let threshold = self.support.width() * (applied_after as f64).sqrt();
        if self.cusum_pos > threshold || self.cusum_neg > threshold {
            self.drift_latched = true;
            self.tier = self.tier.combine(GuaranteeTier::Diagnostic);
            self.notes.push(format!(
                "drift heuristic latched at t={applied_after} (cusum_pos={:.4}, cusum_neg={:.4}, threshold={:.4})",
                self.cusum_pos, self.cusum_neg, threshold
            ));
        }
    }

    fn check_missingness(&mut self, applied_before: u64) {
        let total = applied_before + self.missing;
        if total < MISSINGNESS_MIN_OBSERVATIONS {
            return;
        }
        let ratio = self.missing as f64 / total as f64;
        if ratio > MISSINGNESS_RATIO_THRESHOLD {
            self.tier = self.tier.combine(GuaranteeTier::Diagnostic);
            self.notes.push(format!(
                "missingness ratio {ratio:.3} exceeds {MISSINGNESS_RATIO_THRESHOLD} at total={total}"
            ));
        }
    }

    pub fn tier(&self) -> GuaranteeTier {
        self.tier
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            method: self.method.clone(),
            clipped_count: self.clipped,
            missing_count: self.missing,
            out_of_range_count: self.out_of_range,
            drift_detected: self.drift_latched,
            notes: self.notes.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.clipped = 0;
        self.missing = 0;
        self.out_of_range = 0;
        self.drift_latched = false;
        self.cusum_pos = 0.0;
        self.cusum_neg = 0.0;
        self.tier = GuaranteeTier::Guaranteed;
        self.notes.clear();
    }
}
