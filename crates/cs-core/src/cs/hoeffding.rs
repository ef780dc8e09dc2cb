//! Hoeffding confidence sequence for a bounded mean (§4.3.1): a
//! sub-Gaussian, "stitched" time-uniform half-width.

use super::OneSampleCs;
use crate::diagnostics::{DiagnosticsState, GateOutcome};
use crate::estimator::Estimator;
use cs_types::{Error, GuaranteeTier, Interval, Kind, Result, StreamSpec};

/// Tuning constant for the stitched Hoeffding bound. Fixed, not
/// caller-tunable in v1 (§9 Design Notes, Open Question resolution):
/// cites Howard, Ramdas, McAuliffe & Sekhon, "Time-uniform, nonparametric,
/// nonasymptotic confidence sequences" (Annals of Statistics, 2021), the
/// stitched-bound family with the conventional `rho=1` choice.
pub const HOEFFDING_RHO: f64 = 1.0;

/// Stitched sub-Gaussian half-width at observation count `n`, for a
/// one-sided significance level `alpha_side` over a stream of range
/// `width = b - a`. Callers must guard `n == 0` themselves (undefined).
fn half_width(n: u64, alpha_side: f64, width: f64) -> f64 {
    let n = n as f64;
    let rho2 = HOEFFDING_RHO * HOEFFDING_RHO;
    let inner = (1.0 + 1.0 / (n * rho2)) * ((n * rho2 + 1.0).sqrt() / alpha_side).ln() / (2.0 * n);
    width * inner.max(0.0).sqrt()
}

/// A Hoeffding confidence sequence for the mean of a bounded stream.
#[derive(Debug, Clone)]
pub struct HoeffdingCS {
    spec: StreamSpec,
    estimator: Estimator,
    diagnostics: DiagnosticsState,
}

impl HoeffdingCS {
    pub fn new(spec: StreamSpec) -> Result<Self> {
        if spec.kind != Kind::Bounded && spec.kind != Kind::Bernoulli {
            return Err(Error::UnsupportedKind {
                method: "HoeffdingCS".to_string(),
                kind: format!("{:?}", spec.kind),
            });
        }
        let diagnostics = DiagnosticsState::new("HoeffdingCS", spec.support, spec.clip_mode);
        Ok(HoeffdingCS {
            spec,
            estimator: Estimator::new(),
            diagnostics,
        })
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }
}

impl OneSampleCs for HoeffdingCS {
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

        let (lo, hi) = if n == 0 {
            (a, b)
        } else {
            let alpha_side = self.spec.side_alpha();
            let hw = half_width(n, alpha_side, self.spec.support.width());
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

#[cfg(test)]
mod tests {
    use super::*;
    use cs_types::{ClipMode, Support};

    fn unit_spec() -> StreamSpec {
        StreamSpec::bounded("x", 0.05, Support::new(0.0, 1.0).unwrap()).unwrap()
    }

    #[test]
    fn e1_constant_stream_is_guaranteed_and_well_formed() {
        let mut cs = HoeffdingCS::new(unit_spec()).unwrap();
        for _ in 0..100 {
            cs.update(0.5).unwrap();
        }
        let iv = cs.interval();
        assert!((iv.estimate - 0.5).abs() < 1e-12);
        assert!(iv.lo >= 0.0);
        assert!(iv.hi <= 1.0);
        assert!(iv.width() > 0.0 && iv.width() < 1.0);
        assert_eq!(iv.tier, GuaranteeTier::Guaranteed);
    }

    #[test]
    fn n_zero_is_full_support() {
        let cs = HoeffdingCS::new(unit_spec()).unwrap();
        let iv = cs.interval();
        assert_eq!(iv.lo, 0.0);
        assert_eq!(iv.hi, 1.0);
    }

    #[test]
    fn smaller_alpha_widens_interval() {
        let mut tight = HoeffdingCS::new(
            StreamSpec::bounded("x", 0.2, Support::new(0.0, 1.0).unwrap()).unwrap(),
        )
        .unwrap();
        let mut loose = HoeffdingCS::new(
            StreamSpec::bounded("x", 0.01, Support::new(0.0, 1.0).unwrap()).unwrap(),
        )
        .unwrap();
        for x in [0.3, 0.5, 0.7, 0.2, 0.9] {
            tight.update(x).unwrap();
            loose.update(x).unwrap();
        }
        assert!(loose.interval().width() >= tight.interval().width());
    }

    #[test]
    fn e4_error_mode_raises_on_third_update() {
        let spec = StreamSpec::new(
            "x",
            0.05,
            Kind::Bounded,
            Some(Support::new(0.0, 1.0).unwrap()),
            true,
            ClipMode::Error,
        )
        .unwrap();
        let mut cs = HoeffdingCS::new(spec).unwrap();
        cs.update(0.2).unwrap();
        assert_eq!(cs.interval().tier, GuaranteeTier::Guaranteed);
        cs.update(0.8).unwrap();
        assert_eq!(cs.interval().tier, GuaranteeTier::Guaranteed);
        let err = cs.update(1.5).unwrap_err();
        assert!(matches!(err, Error::AssumptionViolation { .. }));
    }

    #[test]
    fn e5_clip_mode_clips_and_degrades_tier() {
        let spec = StreamSpec::new(
            "x",
            0.05,
            Kind::Bounded,
            Some(Support::new(0.0, 1.0).unwrap()),
            true,
            ClipMode::Clip,
        )
        .unwrap();
        let mut cs = HoeffdingCS::new(spec).unwrap();
        cs.update(0.2).unwrap();
        cs.update(0.8).unwrap();
        cs.update(1.5).unwrap();
        let iv = cs.interval();
        assert_eq!(iv.tier, GuaranteeTier::Clipped);
        assert_eq!(iv.diagnostics.clipped_count, 1);
    }

    #[test]
    fn reset_restores_full_support_and_guaranteed_tier() {
        let mut cs = HoeffdingCS::new(unit_spec()).unwrap();
        cs.update(1.5).unwrap_or(());
        cs.reset();
        let iv = cs.interval();
        assert_eq!(iv.tier, GuaranteeTier::Guaranteed);
        assert_eq!(iv.lo, 0.0);
        assert_eq!(iv.hi, 1.0);
    }
}
