//! Peeking-safe streaming inference: online estimators, time-uniform
//! confidence sequences, e-processes, the assumption-diagnostic layer, and
//! the deterministic method recommender.
//!
//! Every type here is usable independently of any CLI, file format, or
//! config loader: construct a [`cs_types::StreamSpec`]/[`cs_types::ABSpec`],
//! build one of the CS/e-process types below over it, and feed observations
//! one at a time via `update`. All per-observation work is O(1) time and
//! memory; no allocation occurs after construction.

pub mod cs;
pub mod diagnostics;
pub mod ep;
pub mod estimator;
pub mod recommend;

pub use cs::{
    BernoulliMixtureCS, EmpiricalBernsteinCS, HoeffdingCS, OneSampleCs, TwoSampleCS,
};
pub use ep::{BernoulliMixtureE, OneSampleEProcess, PairedBoundedE, Side};
pub use estimator::Estimator;
pub use recommend::{recommend_ab, recommend_cs};
