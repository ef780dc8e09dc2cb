//! Atlas primitives (§2, §4.7): scenario records and stopping-rule
//! predicates. Pure data and pure functions — the Monte-Carlo driver that
//! calls into a generator, feeds a CS/e-process, and aggregates metrics is
//! an external collaborator (§1), not part of this crate.

use crate::error::{Error, Result};
use crate::result::{EValue, Interval};
use serde::{Deserialize, Serialize};

/// A data-generating process for an atlas scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Generator {
    Bernoulli { p: f64 },
    BoundedUniform { a: f64, b: f64 },
    BoundedBeta { a: f64, b: f64, alpha: f64, beta: f64 },
}

impl Generator {
    /// Validate generator parameters at construction time.
    pub fn validate(&self) -> Result<()> {
        match self {
            Generator::Bernoulli { p } => {
                if !p.is_finite() || !(0.0..=1.0).contains(p) {
                    return Err(Error::InvalidScenario(format!(
                        "bernoulli generator requires p in [0,1], got {p}"
                    )));
                }
            }
            Generator::BoundedUniform { a, b } => {
                if !(a.is_finite() && b.is_finite() && a < b) {
                    return Err(Error::InvalidScenario(format!(
                        "bounded_uniform generator requires a < b, got ({a}, {b})"
                    )));
                }
            }
            Generator::BoundedBeta { a, b, alpha, beta } => {
                if !(a.is_finite() && b.is_finite() && a < b) {
                    return Err(Error::InvalidScenario(format!(
                        "bounded_beta generator requires a < b, got ({a}, {b})"
                    )));
                }
                if !(*alpha > 0.0 && *beta > 0.0) {
                    return Err(Error::InvalidScenario(
                        "bounded_beta generator requires alpha > 0 and beta > 0".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// When to evaluate the stopping condition against an accumulating stream
/// of `Interval`/`EValue` snapshots (§4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoppingRule {
    /// Never stop early; always run to `n`.
    FixedHorizon { n: usize },
    /// Stop the first time `theta` falls outside the current `Interval`, or
    /// (for e-processes) the first time `decision` latches.
    StopWhenExcluded { theta: f64 },
    /// Only evaluate the stopping condition every `k`-th observation; state
    /// still accumulates every observation.
    PeriodicLooks { k: usize },
}

impl StoppingRule {
    pub fn validate(&self) -> Result<()> {
        match self {
            StoppingRule::FixedHorizon { n } if *n == 0 => Err(Error::InvalidStoppingRule(
                "fixed_horizon requires n > 0".to_string(),
            )),
            StoppingRule::PeriodicLooks { k } if *k == 0 => Err(Error::InvalidStoppingRule(
                "periodic_looks requires k > 0".to_string(),
            )),
            StoppingRule::StopWhenExcluded { theta } if !theta.is_finite() => Err(
                Error::InvalidStoppingRule("stop_when_excluded requires a finite theta".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Whether the stopping condition should even be *evaluated* at
    /// observation count `t` (distinct from whether it then *fires*).
    pub fn is_look(&self, t: u64) -> bool {
        match self {
            StoppingRule::FixedHorizon { .. } | StoppingRule::StopWhenExcluded { .. } => true,
            StoppingRule::PeriodicLooks { k } => *k > 0 && t % (*k as u64) == 0,
        }
    }

    /// Evaluate the rule against an `Interval` snapshot at its own `t`.
    /// Returns `false` on ticks that aren't a look under `periodic_looks`.
    pub fn should_stop_interval(&self, iv: &Interval) -> bool {
        if !self.is_look(iv.t) {
            return false;
        }
        match self {
            StoppingRule::FixedHorizon { n } => iv.t >= *n as u64,
            StoppingRule::StopWhenExcluded { theta } => !iv.contains(*theta),
            StoppingRule::PeriodicLooks { .. } => false,
        }
    }

    /// Evaluate the rule against an `EValue` snapshot at its own `t`.
    pub fn should_stop_evalue(&self, ev: &EValue) -> bool {
        if !self.is_look(ev.t) {
            return false;
        }
        match self {
            StoppingRule::FixedHorizon { n } => ev.t >= *n as u64,
            StoppingRule::StopWhenExcluded { .. } => ev.decision,
            StoppingRule::PeriodicLooks { .. } => ev.decision,
        }
    }
}

/// A replayable Monte-Carlo scenario definition (§3, loadable from YAML via
/// `cs-config`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub generator: Generator,
    pub n_max: usize,
    pub alpha: f64,
    pub method: String,
    pub stopping_rule: StoppingRule,
    pub replicates: usize,
    pub seed: u64,
}

impl Scenario {
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidAlpha { alpha: self.alpha });
        }
        if self.n_max == 0 {
            return Err(Error::InvalidScenario("n_max must be > 0".to_string()));
        }
        if self.replicates == 0 {
            return Err(Error::InvalidScenario("replicates must be > 0".to_string()));
        }
        if self.method.trim().is_empty() {
            return Err(Error::InvalidScenario("method must be non-empty".to_string()));
        }
        self.generator.validate()?;
        self.stopping_rule.validate()?;
        Ok(())
    }
}

/// Running (not buffered) accumulator for coverage / Type-I / power / width
/// across replicates of a scenario (§4.7, §8). Each method is O(1) per
/// replicate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricAccumulator {
    replicates_seen: u64,
    coverage_hits: u64,
    decision_latched: u64,
    width_sum: f64,
    width_count: u64,
}

impl MetricAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one replicate's coverage outcome: did the true parameter stay
    /// inside the CS at every evaluated `t`?
    pub fn record_coverage(&mut self, covered_at_every_look: bool) {
        self.replicates_seen += 1;
        if covered_at_every_look {
            self.coverage_hits += 1;
        }
    }

    /// Record one replicate's decision outcome: did the e-value ever latch?
    /// Used for both Type-I error (under H0) and power (under an
    /// alternative), depending on the generating scenario.
    pub fn record_decision(&mut self, ever_latched: bool) {
        self.replicates_seen += 1;
        if ever_latched {
            self.decision_latched += 1;
        }
    }

    /// Record one interval's width at the observation point of interest.
    pub fn record_width(&mut self, width: f64) {
        self.width_sum += width;
        self.width_count += 1;
    }

    /// Fraction of replicates where the true parameter stayed covered.
    pub fn coverage(&self) -> f64 {
        if self.replicates_seen == 0 {
            return f64::NAN;
        }
        self.coverage_hits as f64 / self.replicates_seen as f64
    }

    /// Fraction of replicates whose e-value ever latched. Interpreted as
    /// Type-I error under H0-generating scenarios, power under alternatives.
    pub fn latch_rate(&self) -> f64 {
        if self.replicates_seen == 0 {
            return f64::NAN;
        }
        self.decision_latched as f64 / self.replicates_seen as f64
    }

    /// Mean recorded width.
    pub fn mean_width(&self) -> f64 {
        if self.width_count == 0 {
            return f64::NAN;
        }
        self.width_sum / self.width_count as f64
    }
}
