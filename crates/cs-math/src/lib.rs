//! Numerical primitives for time-uniform confidence sequences.
//!
//! Log-space stable arithmetic (`stable`), the Beta distribution's
//! regularized incomplete beta function (`beta`), the Beta-Binomial
//! marginal likelihood used by the Bernoulli mixture methods (`binomial`),
//! and e-value evidence summaries on the Jeffreys scale (`bayes_factor`).

pub mod math;

pub use math::bayes_factor;
pub use math::beta::*;
pub use math::binomial;
pub use math::stable::*;
