//! Two-sample confidence sequence for a bounded mean difference (§4.4): the
//! Minkowski difference of two one-sample CS, one per arm, each built at
//! confidence level `1 - alpha/2` and combined via a union bound.

use super::OneSampleCs;
use cs_types::{ABSpec, Arm, DiagnosticsSnapshot, GuaranteeTier, Interval, Result};

/// A two-sample CS generic over which one-sample method constructs each
/// arm. Two-sample logic depends only on the `OneSampleCs` capability set
/// (§9, "pluggable methods"), never on a concrete construction.
#[derive(Debug, Clone)]
pub struct TwoSampleCS<M: OneSampleCs> {
    spec: ABSpec,
    arm_a: M,
    arm_b: M,
}

impl<M: OneSampleCs> TwoSampleCS<M> {
    /// Build both arms at `1 - alpha/2` via `spec.arm_spec`, using `build`
    /// to construct the concrete one-sample method for each arm's spec.
    pub fn new(spec: ABSpec, build: impl Fn(cs_types::StreamSpec) -> Result<M>) -> Result<Self> {
        let arm_a = build(spec.arm_spec("A")?)?;
        let arm_b = build(spec.arm_spec("B")?)?;
        Ok(TwoSampleCS { spec, arm_a, arm_b })
    }

    pub fn spec(&self) -> &ABSpec {
        &self.spec
    }

    /// Fold one `(arm, value)` observation in.
    pub fn update(&mut self, arm: Arm, x: f64) -> Result<()> {
        match arm {
            Arm::A => self.arm_a.update(x),
            Arm::B => self.arm_b.update(x),
        }
    }

    /// The current interval estimate of `Delta = mu_B - mu_A`.
    pub fn interval(&self) -> Interval {
        let ia = self.arm_a.interval();
        let ib = self.arm_b.interval();

        let mut tier = ia.tier.combine(ib.tier);
        if ia.t == 0 || ib.t == 0 {
            tier = tier.combine(GuaranteeTier::Diagnostic);
        }

        let diagnostics = DiagnosticsSnapshot {
            method: format!("TwoSample{}", ia.diagnostics.method),
            clipped_count: ia.diagnostics.clipped_count + ib.diagnostics.clipped_count,
            missing_count: ia.diagnostics.missing_count + ib.diagnostics.missing_count,
            out_of_range_count: ia.diagnostics.out_of_range_count
                + ib.diagnostics.out_of_range_count,
            drift_detected: ia.diagnostics.drift_detected || ib.diagnostics.drift_detected,
            notes: ia
                .diagnostics
                .notes
                .iter()
                .cloned()
                .chain(ib.diagnostics.notes.iter().cloned())
                .collect(),
        };

        Interval {
            t: ia.t + ib.t,
            estimate: ib.estimate - ia.estimate,
            lo: ib.lo - ia.hi,
            hi: ib.hi - ia.lo,
            tier,
            alpha: self.spec.alpha,
            diagnostics,
        }
    }

    pub fn reset(&mut self) {
        self.arm_a.reset();
        self.arm_b.reset();
    }

    /// Swap arms A and B in place, for arm-symmetry testing (§8 invariant
    /// 4): the returned interval's `estimate` negates and `(lo, hi)`
    /// reflect to `(-hi, -lo)`.
    pub fn swap_arms(self) -> Self {
        TwoSampleCS {
            spec: self.spec,
            arm_a: self.arm_b,
            arm_b: self.arm_a,
        }
    }
}
