//! Core math modules.

pub mod bayes_factor;
pub mod beta;
pub mod binomial;
pub mod stable;
