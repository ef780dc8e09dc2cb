//! Runtime dispatch over the concrete one-sample method `recommend_cs`
//! names. The core's `OneSampleCs` trait has no object-safety concerns, but
//! `TwoSampleCS<M>` is generic over a single concrete `M`; an enum that
//! implements `OneSampleCs` by delegation lets the CLI pick a method by name
//! at startup and still hand a single concrete type to `TwoSampleCS::new`.

use cs_core::cs::{BernoulliMixtureCS, EmpiricalBernsteinCS, HoeffdingCS, OneSampleCs};
use cs_types::{Interval, Result, StreamSpec};

#[derive(Debug, Clone)]
pub enum AnyOneSample {
    Hoeffding(HoeffdingCS),
    EmpiricalBernstein(EmpiricalBernsteinCS),
    BernoulliMixture(BernoulliMixtureCS),
}

impl AnyOneSample {
    /// Build the method named by `recommend_cs`/`recommend_ab`'s
    /// `Recommendation::method` field. `recommend_ab` names the per-arm
    /// method with a `TwoSample` prefix (`TwoSampleHoeffdingCS`,
    /// `TwoSampleEmpiricalBernsteinCS`, per §4.6), so that prefix is
    /// stripped before matching. Unknown names fall back to the
    /// distribution-free Empirical-Bernstein bound, which accepts any
    /// bounded spec.
    pub fn build(method: &str, spec: StreamSpec) -> Result<Self> {
        let inner = method.strip_prefix("TwoSample").unwrap_or(method);
        match inner {
            "BernoulliMixtureCS" => Ok(AnyOneSample::BernoulliMixture(BernoulliMixtureCS::new(spec)?)),
            "HoeffdingCS" => Ok(AnyOneSample::Hoeffding(HoeffdingCS::new(spec)?)),
            _ => Ok(AnyOneSample::EmpiricalBernstein(EmpiricalBernsteinCS::new(spec)?)),
        }
    }
}

impl OneSampleCs for AnyOneSample {
    fn update(&mut self, x: f64) -> Result<()> {
        match self {
            AnyOneSample::Hoeffding(cs) => cs.update(x),
            AnyOneSample::EmpiricalBernstein(cs) => cs.update(x),
            AnyOneSample::BernoulliMixture(cs) => cs.update(x),
        }
    }

    fn interval(&self) -> Interval {
        match self {
            AnyOneSample::Hoeffding(cs) => cs.interval(),
            AnyOneSample::EmpiricalBernstein(cs) => cs.interval(),
            AnyOneSample::BernoulliMixture(cs) => cs.interval(),
        }
    }

    fn reset(&mut self) {
        match self {
            AnyOneSample::Hoeffding(cs) => cs.reset(),
            AnyOneSample::EmpiricalBernstein(cs) => cs.reset(),
            AnyOneSample::BernoulliMixture(cs) => cs.reset(),
        }
    }
}
