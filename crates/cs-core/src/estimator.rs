//! Online sufficient statistics (§4.1): count, running mean, and running
//! variance via Welford's recurrence. O(1) time and memory per update, no
//! allocation after construction.

use serde::{Deserialize, Serialize};

/// Running count/mean/variance accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimator {
    n: u64,
    mean: f64,
    m2: f64,
}

impl Default for Estimator {
    fn default() -> Self {
        Estimator::new()
    }
}

impl Estimator {
    pub fn new() -> Self {
        Estimator {
            n: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Fold one observation in. `x` must already have passed the
    /// diagnostics gates (finite, in support or clipped).
    pub fn update(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance `m2 / (n - 1)`, or `0.0` for `n < 2`.
    pub fn variance(&self) -> f64 {
        if self.n < 2 {
            0.0
        } else {
            self.m2 / (self.n as f64 - 1.0)
        }
    }

    pub fn reset(&mut self) {
        self.n = 0;
        self.mean = 0.0;
        self.m2 = 0.0;
    }
}
