//! Bernoulli mixture confidence sequence (§4.3.3): a beta-binomial mixture
//! martingale over a `Beta(1/2, 1/2)` (Jeffreys) prior on the true rate.
//! Strictly tighter than Hoeffding/Empirical-Bernstein on Bernoulli data.

use super::OneSampleCs;
use crate::diagnostics::{DiagnosticsState, GateOutcome};
use crate::estimator::Estimator;
use cs_math::math::binomial::log_beta_binomial;
use cs_types::{Error, GuaranteeTier, Interval, Kind, Result, StreamSpec};

const JEFFREYS_ALPHA: f64 = 0.5;
const JEFFREYS_BETA: f64 = 0.5;
const BISECTION_ITERS: u32 = 60;

/// `k * ln(q)`, with the `0 * ln(0) = 0` convention so a count of zero
/// contributes nothing regardless of the other endpoint's value.
fn weighted_log(k: f64, q: f64) -> f64 {
    if k == 0.0 {
        0.0
    } else {
        k * q.ln()
    }
}

/// `log BetaBin(s,n;1/2,1/2) - s*ln(p) - f*ln(1-p) - ln(1/alpha_side)`. The
/// confidence sequence at time `n` is `{p : g(p) < 0}`.
fn g(p: f64, s: f64, n: f64, alpha_side: f64) -> f64 {
    let f = n - s;
    log_beta_binomial(s, n, JEFFREYS_ALPHA, JEFFREYS_BETA)
        - weighted_log(s, p)
        - weighted_log(f, 1.0 - p)
        - (1.0 / alpha_side).ln()
}

/// Bisect for the left boundary of `{p : g(p) < 0}` on `[0, p_hat]`. `g` is
/// convex in `p` with its minimum at `p_hat = s/n`, so it is monotone
/// decreasing on this segment.
fn find_left_boundary(s: f64, n: f64, alpha_side: f64, p_hat: f64) -> f64 {
    if s == 0.0 {
        return 0.0;
    }
    let mut lo = 0.0_f64;
    let mut hi = p_hat;
    if g(hi, s, n, alpha_side) >= 0.0 {
        return hi;
    }
    for _ in 0..BISECTION_ITERS {
        let mid = 0.5 * (lo + hi);
        if g(mid, s, n, alpha_side) < 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

/// Bisect for the right boundary of `{p : g(p) < 0}` on `[p_hat, 1]`.
fn find_right_boundary(s: f64, n: f64, alpha_side: f64, p_hat: f64) -> f64 {
    let f = n - s;
    if f == 0.0 {
        return 1.0;
    }
    let mut lo = p_hat;
    let mut hi = 1.0_f64;
    if g(lo, s, n, alpha_side) >= 0.0 {
        return lo;
    }
    for _ in 0..BISECTION_ITERS {
        let mid = 0.5 * (lo + hi);
        if g(mid, s, n, alpha_side) < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// A Bernoulli mixture confidence sequence for the true success rate.
#[derive(Debug, Clone)]
pub struct BernoulliMixtureCS {
    spec: StreamSpec,
    estimator: Estimator,
    diagnostics: DiagnosticsState,
    successes: f64,
}

impl BernoulliMixtureCS {
    pub fn new(spec: StreamSpec) -> Result<Self> {
        if spec.kind != Kind::Bernoulli {
            return Err(Error::UnsupportedKind {
                method: "BernoulliMixtureCS".to_string(),
                kind: format!("{:?}", spec.kind),
            });
        }
        let diagnostics =
            DiagnosticsState::new("BernoulliMixtureCS", spec.support, spec.clip_mode);
        Ok(BernoulliMixtureCS {
            spec,
            estimator: Estimator::new(),
            diagnostics,
            successes: 0.0,
        })
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }
}

impl OneSampleCs for BernoulliMixtureCS {
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
        Ok(())
    }

    fn interval(&self) -> Interval {
        let n = self.estimator.n();
        let n_f = n as f64;
        let p_hat = if n == 0 { 0.5 } else { self.successes / n_f };

        let (lo, hi) = if n == 0 {
            (0.0, 1.0)
        } else {
            let alpha_side = self.spec.side_alpha();
            if self.spec.two_sided {
                (
                    find_left_boundary(self.successes, n_f, alpha_side, p_hat),
                    find_right_boundary(self.successes, n_f, alpha_side, p_hat),
                )
            } else {
                (0.0, find_right_boundary(self.successes, n_f, alpha_side, p_hat))
            }
        };

        Interval {
            t: n,
            estimate: p_hat.clamp(0.0, 1.0),
            lo: lo.clamp(0.0, 1.0),
            hi: hi.clamp(0.0, 1.0),
            tier: self.diagnostics.tier(),
            alpha: self.spec.alpha,
            diagnostics: self.diagnostics.snapshot(),
        }
    }

    fn reset(&mut self) {
        self.estimator.reset();
        self.diagnostics.reset();
        self.successes = 0.0;
    }
}
