//! One-sample Bernoulli mixture e-process (§4.5.1): the likelihood ratio of
//! a `Beta(1/2, 1/2)` mixture, truncated to the side of `p0` the alternative
//! occupies, against the point null `Bernoulli(p0)`.
//!
//! Truncating the Jeffreys mixture to `(p0, 1)` (or `(0, p0)`) rather than
//! using the untruncated prior is what makes the one-sided tests (`Le`,
//! `Ge`) valid for the *composite* null `p <= p0` (or `p >= p0`), not just
//! the point null `p = p0`: the truncated mixture's alternative mass never
//! crosses the boundary, so `E_{H0}[E_n] <= 1` for every `p` in the null
//! half-line, not only at `p0` itself. The two-sided `Eq` test averages the
//! `Le` and `Ge` processes, which is exact at the point null `p = p0`.

use super::{OneSampleEProcess, Side};
use crate::diagnostics::{DiagnosticsState, GateOutcome};
use crate::estimator::Estimator;
use cs_math::bayes_factor::EvidenceSummary;
use cs_math::beta_cdf;
use cs_math::math::binomial::log_beta_binomial;
use cs_math::log_add_exp;
use cs_types::{Error, EValue, Kind, Result, StreamSpec};

const JEFFREYS_ALPHA: f64 = 0.5;
const JEFFREYS_BETA: f64 = 0.5;

/// `log` of the truncated-mixture marginal over `Bernoulli(p0)`, for the
/// side whose alternative mass lies above `p0` (`upper = true`, the `Le`
/// test) or below it (`upper = false`, the `Ge` test).
fn log_e_one_sided(s: f64, f: f64, n: f64, p0: f64, upper: bool) -> f64 {
    let (prior_mass, post_tail) = if upper {
        (
            1.0 - beta_cdf(p0, JEFFREYS_ALPHA, JEFFREYS_BETA),
            1.0 - beta_cdf(p0, s + JEFFREYS_ALPHA, f + JEFFREYS_BETA),
        )
    } else {
        (
            beta_cdf(p0, JEFFREYS_ALPHA, JEFFREYS_BETA),
            beta_cdf(p0, s + JEFFREYS_ALPHA, f + JEFFREYS_BETA),
        )
    };
    log_beta_binomial(s, n, JEFFREYS_ALPHA, JEFFREYS_BETA)
        + post_tail.max(f64::MIN_POSITIVE).ln()
        - prior_mass.max(f64::MIN_POSITIVE).ln()
        - s * p0.ln()
        - f * (1.0 - p0).ln()
}

/// A one-sample e-process testing the true Bernoulli success rate against
/// a fixed boundary `p0`.
#[derive(Debug, Clone)]
pub struct BernoulliMixtureE {
    spec: StreamSpec,
    p0: f64,
    side: Side,
    estimator: Estimator,
    diagnostics: DiagnosticsState,
    successes: f64,
    decision_latched: bool,
}

impl BernoulliMixtureE {
    pub fn new(spec: StreamSpec, p0: f64, side: Side) -> Result<Self> {
        if spec.kind != Kind::Bernoulli {
            return Err(Error::UnsupportedKind {
                method: "BernoulliMixtureE".to_string(),
                kind: format!("{:?}", spec.kind),
            });
        }
        if !p0.is_finite() || !(p0 > 0.0 && p0 < 1.0) {
            return Err(Error::InvalidP0 { p0 });
        }
        let diagnostics =
            DiagnosticsState::new("BernoulliMixtureE", spec.support, spec.clip_mode);
        Ok(BernoulliMixtureE {
            spec,
            p0,
            side,
            estimator: Estimator::new(),
            diagnostics,
            successes: 0.0,
            decision_latched: false,
        })
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }

    fn log_e(&self) -> f64 {
        let n = self.estimator.n() as f64;
        let s = self.successes;
        let f = n - s;
        match self.side {
            Side::Le => log_e_one_sided(s, f, n, self.p0, true),
            Side::Ge => log_e_one_sided(s, f, n, self.p0, false),
            Side::Eq => {
                log_add_exp(
                    log_e_one_sided(s, f, n, self.p0, true),
                    log_e_one_sided(s, f, n, self.p0, false),
                ) - std::f64::consts::LN_2
            }
        }
    }
}

impl OneSampleEProcess for BernoulliMixtureE {
    fn update(&mut self, x: f64) -> Result<()> {
        let applied_before = self.estimator.n();
        match self.diagnostics.gate(x, applied_before)? {
            GateOutcome::Missing => {}
            GateOutcome::Apply(value) => {
                self.successes += value;
                self.estimator.update(value);
                self.diagnostics
                    .observe_drift(value, self.estimator.mean(), self.estimator.n());
            }
        }
        if self.log_e() >= -self.spec.alpha.ln() {
            self.decision_latched = true;
        }
        Ok(())
    }

    fn evalue(&self) -> EValue {
        let log_e = self.log_e();
        let threshold = -self.spec.alpha.ln();
        EValue {
            t: self.estimator.n(),
            e: cs_math::bayes_factor::e_value_from_log_bf(log_e),
            log_e,
            decision: self.decision_latched || log_e >= threshold,
            tier: self.diagnostics.tier(),
            alpha: self.spec.alpha,
            diagnostics: self.diagnostics.snapshot(),
            evidence: EvidenceSummary::from_log_bf(log_e),
        }
    }

    fn reset(&mut self) {
        self.estimator.reset();
        self.diagnostics.reset();
        self.successes = 0.0;
        self.decision_latched = false;
    }
}
