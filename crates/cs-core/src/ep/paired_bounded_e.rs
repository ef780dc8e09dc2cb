//! Two-sample paired bounded-difference e-process (§4.5.2): a Gaussian
//! mixture martingale over the bounded increment formed by pairing each new
//! observation against the opposing arm's current running-mean estimate.
//!
//! For an arm-B observation `x`, the paired increment is
//! `y = x - mean_a_hat` (using arm A's mean *before* this observation is
//! folded in, so `y` is bounded in `[-(b-a), b-a]`); for an arm-A
//! observation the roles swap and the sign flips. The running sums
//! `S_n = sum y_t` and `V_n = sum y_t^2` (each term bounded by `(b-a)^2`,
//! the "data-dependent variance scaling" of §4.5.2) feed the closed-form
//! normal-mixture e-process (Darling & Robbins 1968; Howard, Ramdas,
//! McAuliffe & Sekhon 2021, §3):
//!
//! `log E_n(rho) = -1/2 * ln(rho^2 V_n + 1) + rho^2 S_n^2 / (2 (rho^2 V_n + 1))`
//!
//! tuned with `rho = 1 / (b-a)` so the mixture's prior variance on the mean
//! shift scales with the support width. Negating `S_n` swaps which
//! direction the process favors, so `Le`/`Ge` share one running `(S_n,
//! V_n)` pair and `Eq` averages both in log space.

use super::{OneSampleEProcess, Side};
use crate::diagnostics::{DiagnosticsState, GateOutcome};
use crate::estimator::Estimator;
use cs_math::bayes_factor::EvidenceSummary;
use cs_math::log_add_exp;
use cs_types::{ABSpec, Arm, DiagnosticsSnapshot, EValue, GuaranteeTier, Result};

fn log_mixture(s_n: f64, v_n: f64, rho2: f64) -> f64 {
    let denom = rho2 * v_n + 1.0;
    -0.5 * denom.ln() + (rho2 * s_n * s_n) / (2.0 * denom)
}

/// A two-sample e-process for the bounded mean difference `Delta = mu_B -
/// mu_A`.
#[derive(Debug, Clone)]
pub struct PairedBoundedE {
    spec: ABSpec,
    side: Side,
    mean_a: Estimator,
    mean_b: Estimator,
    diag_a: DiagnosticsState,
    diag_b: DiagnosticsState,
    rho2: f64,
    s_n: f64,
    v_n: f64,
    decision_latched: bool,
}

impl PairedBoundedE {
    pub fn new(spec: ABSpec, side: Side) -> Result<Self> {
        let width = spec.support.width();
        let diag_a = DiagnosticsState::new("PairedBoundedE::A", spec.support, spec.clip_mode);
        let diag_b = DiagnosticsState::new("PairedBoundedE::B", spec.support, spec.clip_mode);
        Ok(PairedBoundedE {
            spec,
            side,
            mean_a: Estimator::new(),
            mean_b: Estimator::new(),
            diag_a,
            diag_b,
            rho2: 1.0 / (width * width),
            s_n: 0.0,
            v_n: 0.0,
            decision_latched: false,
        })
    }

    pub fn spec(&self) -> &ABSpec {
        &self.spec
    }

    /// Fold one `(arm, value)` observation in.
    pub fn update(&mut self, arm: Arm, x: f64) -> Result<()> {
        match arm {
            Arm::A => {
                let applied_before = self.mean_a.n();
                match self.diag_a.gate(x, applied_before)? {
                    GateOutcome::Missing => {}
                    GateOutcome::Apply(value) => {
                        if self.mean_b.n() > 0 {
                            let y = self.mean_b.mean() - value;
                            self.s_n += y;
                            self.v_n += y * y;
                        }
                        self.mean_a.update(value);
                        self.diag_a
                            .observe_drift(value, self.mean_a.mean(), self.mean_a.n());
                    }
                }
            }
            Arm::B => {
                let applied_before = self.mean_b.n();
                match self.diag_b.gate(x, applied_before)? {
                    GateOutcome::Missing => {}
                    GateOutcome::Apply(value) => {
                        if self.mean_a.n() > 0 {
                            let y = value - self.mean_a.mean();
                            self.s_n += y;
                            self.v_n += y * y;
                        }
                        self.mean_b.update(value);
                        self.diag_b
                            .observe_drift(value, self.mean_b.mean(), self.mean_b.n());
                    }
                }
            }
        }
        if self.log_e() >= -self.spec.alpha.ln() {
            self.decision_latched = true;
        }
        Ok(())
    }

    fn log_e(&self) -> f64 {
        match self.side {
            Side::Le => log_mixture(self.s_n, self.v_n, self.rho2),
            Side::Ge => log_mixture(-self.s_n, self.v_n, self.rho2),
            Side::Eq => {
                log_add_exp(
                    log_mixture(self.s_n, self.v_n, self.rho2),
                    log_mixture(-self.s_n, self.v_n, self.rho2),
                ) - std::f64::consts::LN_2
            }
        }
    }

    pub fn evalue(&self) -> EValue {
        let log_e = self.log_e();
        let threshold = -self.spec.alpha.ln();
        let tier = {
            let mut tier = self.diag_a.tier().combine(self.diag_b.tier());
            if self.mean_a.n() == 0 || self.mean_b.n() == 0 {
                tier = tier.combine(GuaranteeTier::Diagnostic);
            }
            tier
        };
        let da = self.diag_a.snapshot();
        let db = self.diag_b.snapshot();
        let diagnostics = DiagnosticsSnapshot {
            method: "PairedBoundedE".to_string(),
            clipped_count: da.clipped_count + db.clipped_count,
            missing_count: da.missing_count + db.missing_count,
            out_of_range_count: da.out_of_range_count + db.out_of_range_count,
            drift_detected: da.drift_detected || db.drift_detected,
            notes: da.notes.into_iter().chain(db.notes).collect(),
        };
        EValue {
            t: self.mean_a.n() + self.mean_b.n(),
            e: cs_math::bayes_factor::e_value_from_log_bf(log_e),
            log_e,
            decision: self.decision_latched || log_e >= threshold,
            tier,
            alpha: self.spec.alpha,
            diagnostics,
            evidence: EvidenceSummary::from_log_bf(log_e),
        }
    }

    pub fn reset(&mut self) {
        self.mean_a.reset();
        self.mean_b.reset();
        self.diag_a.reset();
        self.diag_b.reset();
        self.s_n = 0.0;
        self.v_n = 0.0;
        self.decision_latched = false;
    }

    /// Swap arms A and B in place, for arm-symmetry testing (§4.5.2
    /// invariant 3): swapping negates every paired increment, so `Le` and
    /// `Ge` e-values trade places and `Eq` is unchanged.
    pub fn swap_arms(self) -> Self {
        PairedBoundedE {
            spec: self.spec,
            side: self.side,
            mean_a: self.mean_b,
            mean_b: self.mean_a,
            diag_a: self.diag_b,
            diag_b: self.diag_a,
            rho2: self.rho2,
            s_n: -self.s_n,
            v_n: self.v_n,
            decision_latched: self.decision_latched,
        }
    }
}
