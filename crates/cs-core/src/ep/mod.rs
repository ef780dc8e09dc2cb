//! E-processes (§4.5): sequential tests that stay valid under continuous
//! monitoring and optional stopping. Each one accumulates a nonnegative
//! process `E_t` with `E_{H0}[E_tau] <= 1` at any stopping time `tau`; a
//! decision latches the first time `E_t >= 1/alpha` and never retracts.

pub mod bernoulli_mixture_e;
pub mod paired_bounded_e;

pub use bernoulli_mixture_e::BernoulliMixtureE;
pub use paired_bounded_e::PairedBoundedE;

use cs_types::{EValue, Result};

/// Which null hypothesis a one- or two-sample e-process tests against its
/// boundary parameter (`p0` for [`BernoulliMixtureE`], `0` for
/// [`PairedBoundedE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// H0: parameter <= boundary (alternative: parameter > boundary).
    Le,
    /// H0: parameter >= boundary (alternative: parameter < boundary).
    Ge,
    /// Two-sided point null, parameter = boundary; a symmetric combination
    /// of the `Le` and `Ge` one-sided processes.
    Eq,
}

/// Shared capability every one-sample e-process exposes.
pub trait OneSampleEProcess {
    /// Fold one observation in. Fails only under `clip_mode=error` when the
    /// value is outside the declared support.
    fn update(&mut self, x: f64) -> Result<()>;

    /// A fresh, immutable snapshot of the current e-value.
    fn evalue(&self) -> EValue;

    /// Clear all estimator and diagnostics state; the decision latch un-
    /// latches along with everything else.
    fn reset(&mut self);
}
