//! Immutable configuration records: `StreamSpec` and `ABSpec`.
//!
//! Both are validated exhaustively at construction time and fail with
//! [`Error::InvalidAlpha`]/[`Error::InvalidSupport`] on violation; neither
//! type ever raises once built. See §3 of the design document for the full
//! data model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The declared distributional family of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// A stream bounded in `[a, b]`, general real-valued.
    Bounded,
    /// A stream of 0/1 observations. `support` is fixed to `(0, 1)`.
    Bernoulli,
}

/// How an out-of-support observation is handled by the diagnostics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipMode {
    /// Raise `AssumptionViolationError` and leave the observation unapplied.
    Error,
    /// Clip into `[a, b]`, increment the clipped counter, degrade the tier.
    Clip,
}

/// A declared bounded support `[a, b]` with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    pub a: f64,
    pub b: f64,
}

impl Support {
    /// Construct a support, validating `a < b` and finiteness.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        if !a.is_finite() || !b.is_finite() || !(a < b) {
            return Err(Error::InvalidSupport { a, b });
        }
        Ok(Support { a, b })
    }

    /// The canonical Bernoulli support `(0, 1)`.
    pub fn unit() -> Self {
        Support { a: 0.0, b: 1.0 }
    }

    /// Width `b - a`.
    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Clip `x` into `[a, b]`.
    pub fn clip(&self, x: f64) -> f64 {
        x.clamp(self.a, self.b)
    }

    /// `true` if `x` lies within `[a, b]`.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.a && x <= self.b
    }
}

/// Validate that `alpha` lies strictly in `(0, 1)`.
fn validate_alpha(alpha: f64) -> Result<()> {
    if !alpha.is_finite() || !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::InvalidAlpha { alpha });
    }
    Ok(())
}

/// Validate (and default) a support declaration against `kind`.
fn validate_support(kind: Kind, support: Option<Support>) -> Result<Support> {
    match kind {
        Kind::Bernoulli => match support {
            None => Ok(Support::unit()),
            Some(s) if s.a == 0.0 && s.b == 1.0 => Ok(s),
            Some(s) => Err(Error::InvalidSupport { a: s.a, b: s.b }),
        },
        Kind::Bounded => support.ok_or(Error::InvalidSupport {
            a: f64::NAN,
            b: f64::NAN,
        }),
    }
}

/// Immutable, validated configuration for a single bounded or Bernoulli
/// stream (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub name: String,
    pub alpha: f64,
    pub kind: Kind,
    pub support: Support,
    pub two_sided: bool,
    pub clip_mode: ClipMode,
}

impl StreamSpec {
    /// Construct and validate a `StreamSpec`.
    ///
    /// `support` may be omitted for `kind=bernoulli`, in which case it
    /// defaults to `(0, 1)`.
    pub fn new(
        name: impl Into<String>,
        alpha: f64,
        kind: Kind,
        support: Option<Support>,
        two_sided: bool,
        clip_mode: ClipMode,
    ) -> Result<Self> {
        validate_alpha(alpha)?;
        let support = validate_support(kind, support)?;
        Ok(StreamSpec {
            name: name.into(),
            alpha,
            kind,
            support,
            two_sided,
            clip_mode,
        })
    }

    /// Convenience constructor for a two-sided bounded spec.
    pub fn bounded(name: impl Into<String>, alpha: f64, support: Support) -> Result<Self> {
        Self::new(name, alpha, Kind::Bounded, Some(support), true, ClipMode::Clip)
    }

    /// Convenience constructor for a two-sided Bernoulli spec.
    pub fn bernoulli(name: impl Into<String>, alpha: f64) -> Result<Self> {
        Self::new(name, alpha, Kind::Bernoulli, None, true, ClipMode::Clip)
    }

    /// The per-side alpha used by a one-sided construction: `alpha` itself,
    /// since the full mass goes to the one open side.
    pub fn side_alpha(&self) -> f64 {
        if self.two_sided {
            self.alpha / 2.0
        } else {
            self.alpha
        }
    }

    /// Re-run construction-time validation against already-populated
    /// fields. Deserializing a `StreamSpec` directly (e.g. from YAML) skips
    /// [`StreamSpec::new`]; callers at that boundary must call this before
    /// trusting the spec.
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        let expected = validate_support(self.kind, Some(self.support))?;
        if expected != self.support {
            return Err(Error::InvalidSupport {
                a: self.support.a,
                b: self.support.b,
            });
        }
        Ok(())
    }
}

/// Immutable, validated configuration for a two-sample comparison governing
/// `Δ = μ_B - μ_A` (§3). In v1, two-sample constructions require
/// `two_sided = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ABSpec {
    pub name: String,
    pub alpha: f64,
    pub kind: Kind,
    pub support: Support,
    pub two_sided: bool,
    pub clip_mode: ClipMode,
}

impl ABSpec {
    /// Construct and validate an `ABSpec`. Fails with
    /// [`Error::UnsupportedSidedness`] unless `two_sided = true`: one-sided
    /// two-sample inference is an Open Question this implementation does not
    /// resolve (see DESIGN.md).
    pub fn new(
        name: impl Into<String>,
        alpha: f64,
        kind: Kind,
        support: Option<Support>,
        two_sided: bool,
        clip_mode: ClipMode,
    ) -> Result<Self> {
        validate_alpha(alpha)?;
        let support = validate_support(kind, support)?;
        if !two_sided {
            return Err(Error::UnsupportedSidedness {
                method: "ABSpec".to_string(),
                expected: true,
                actual: false,
            });
        }
        Ok(ABSpec {
            name: name.into(),
            alpha,
            kind,
            support,
            two_sided,
            clip_mode,
        })
    }

    /// The one-sample `StreamSpec` each arm is evaluated under, at
    /// confidence level `1 - alpha/2` (§4.4).
    pub fn arm_spec(&self, arm_name: &str) -> Result<StreamSpec> {
        StreamSpec::new(
            format!("{}::{}", self.name, arm_name),
            self.alpha / 2.0,
            self.kind,
            Some(self.support),
            true,
            self.clip_mode,
        )
    }

    /// Re-run construction-time validation against already-populated
    /// fields; see [`StreamSpec::validate`].
    pub fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        let expected = validate_support(self.kind, Some(self.support))?;
        if expected != self.support {
            return Err(Error::InvalidSupport {
                a: self.support.a,
                b: self.support.b,
            });
        }
        if !self.two_sided {
            return Err(Error::UnsupportedSidedness {
                method: "ABSpec".to_string(),
                expected: true,
                actual: false,
            });
        }
        Ok(())
    }
}

/// Which arm of a two-sample stream an observation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arm {
    A,
    B,
}

impl std::str::FromStr for Arm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" | "a" => Ok(Arm::A),
            "B" | "b" => Ok(Arm::B),
            other => Err(Error::UnknownArm {
                arm: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Arm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arm::A => write!(f, "A"),
            Arm::B => write!(f, "B"),
        }
    }
}
