//! Empirical Bernstein confidence sequence for a bounded mean (§4.3.2):
//! variance-adaptive, dominates Hoeffding when the running variance is
//! small relative to the range.

use super::OneSampleCs;
use crate::diagnostics::{DiagnosticsState, GateOutcome};
use crate::estimator::Estimator;
use cs_types::{Error, GuaranteeTier, Interval, Kind, Result, StreamSpec};

/// Variance term coefficient in the empirical Bernstein half-width. Fixed,
/// not caller-tunable in v1 (§9 Design Notes, Open Question resolution):
/// cites Maurer & Pontil, "Empirical Bernstein Bounds and Sample-Variance
/// Penalization" (COLT 2009).
pub const EB_VARIANCE_COEF: f64 = 2.0;
/// Range term numerator coefficient, same citation as [`EB_VARIANCE_COEF`].
pub const EB_RANGE_COEF: f64 = 7.0;
/// Range term denominator coefficient, same citation as [`EB_VARIANCE_COEF`].
pub const EB_RANGE_DENOM: f64 = 3.0;

fn half_width(n: u64, variance: f64, alpha_side: f64, width: f64) -> f64 {
    let n_f = n as f64;
    let log_inv_alpha = (1.0 / alpha_side).ln();
    let variance_term = (EB_VARIANCE_COEF * variance * log_inv_alpha / n_f).sqrt();
    let range_term = EB_RANGE_COEF * width * log_inv_alpha / (EB_RANGE_DENOM * (n_f - 1.0));
    variance_term + range_term
}

/// An empirical Bernstein confidence sequence for the mean of a bounded
/// stream.
#[derive(Debug, Clone)]
pub struct EmpiricalBernsteinCS {
    spec: StreamSpec,
    estimator: Estimator,
    diagnostics: DiagnosticsState,
}

impl EmpiricalBernsteinCS {
    pub fn new(spec: StreamSpec) -> Result<Self> {
        if spec.kind != Kind::Bounded && spec.kind != Kind::Bernoulli {
            return Err(Error::UnsupportedKind {
                method: "EmpiricalBernsteinCS".to_string(),
                kind: format!("{:?}", spec.kind),
            });
        }
        let diagnostics =
            DiagnosticsState::new("EmpiricalBernsteinCS", spec.support, spec.clip_mode);
        Ok(EmpiricalBernsteinCS {
            spec,
            estimator: Estimator::new(),
            diagnostics,
        })
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }
}

impl OneSampleCs for EmpiricalBernsteinCS {
    fn update(&mut self, x: f64) -> Result<()> {
        let applied_before = self.estimator.n();
        match self.diagnostics.gate(x, applied_before)? {
            GateOutcome::Missing => {}
            GateOutcome::Apply(value) => {
                self.estimator.update(value);
                self.diagnostics
                    .observe_drift(value, self.estimator.mean(), self.estimator.n());
            }
        }
        Ok(())
    }

    fn interval(&self) -> Interval {
        let a = self.spec.support.a;
        let b = self.spec.support.b;
        let n = self.estimator.n();
        let estimate = self.spec.support.clip(self.estimator.mean());

        let (lo, hi) = if n < 2 {
            (a, b)
        } else {
            let alpha_side = self.spec.side_alpha();
            let hw = half_width(
                n,
                self.estimator.variance(),
                alpha_side,
                self.spec.support.width(),
            );
            let mean = self.estimator.mean();
            if self.spec.two_sided {
                ((mean - hw).max(a), (mean + hw).min(b))
            } else {
                (a, (mean + hw).min(b))
            }
        };

        Interval {
            t: n,
            estimate,
            lo,
            hi,
            tier: self.diagnostics.tier(),
            alpha: self.spec.alpha,
            diagnostics: self.diagnostics.snapshot(),
        }
    }

    fn reset(&mut self) {
        self.estimator.reset();
        self.diagnostics.reset();
    }
}
