//! Beta-Binomial marginal likelihood for the Bernoulli mixture methods.
//!
//! `log BetaBin(s, n; a, b) = log C(n, s) + log B(s+a, n-s+b) - log B(a, b)`,
//! the closed-form log marginal (prior predictive) probability of observing
//! `s` successes in `n` Bernoulli trials under a `Beta(a, b)` mixture over
//! the success rate. This is the term the Bernoulli mixture CS (§4.3.3) and
//! e-process (§4.5.1) evaluate at the Jeffreys prior `a = b = 1/2`.

use super::stable::{log_beta, log_gamma};

/// log C(n, k), extended to fractional arguments via log-Gamma.
fn log_binom_coef(n: f64, k: f64) -> f64 {
    if n < 0.0 || k < 0.0 || k > n {
        return f64::NEG_INFINITY;
    }
    if n == 0.0 && k == 0.0 {
        return 0.0;
    }
    log_gamma(n + 1.0) - log_gamma(k + 1.0) - log_gamma(n - k + 1.0)
}

/// log BetaBin(s, n; alpha, beta).
pub fn log_beta_binomial(s: f64, n: f64, alpha: f64, beta: f64) -> f64 {
    if s.is_nan() || n.is_nan() || alpha.is_nan() || beta.is_nan() {
        return f64::NAN;
    }
    if s < 0.0 || n < 0.0 || s > n || alpha <= 0.0 || beta <= 0.0 {
        return f64::NAN;
    }

    let post_alpha = alpha + s;
    let post_beta = beta + (n - s);
    if post_alpha <= 0.0 || post_beta <= 0.0 {
        return f64::NAN;
    }

    log_binom_coef(n, s) + log_beta(post_alpha, post_beta) - log_beta(alpha, beta)
}
