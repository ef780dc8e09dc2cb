//! The guarantee-tier lattice.
//!
//! Every `Interval` and `EValue` carries a [`GuaranteeTier`] recording whether
//! the anytime-valid guarantee backing the snapshot can still be trusted.
//! The lattice is monotone non-increasing over a stream's lifetime: once an
//! instance degrades to `Clipped` or `Diagnostic`, a later snapshot can never
//! report a higher tier without an intervening `reset()`.

use serde::{Deserialize, Serialize};

/// Validity tier attached to every `Interval`/`EValue` snapshot.
///
/// Declared in ascending order so the derived `Ord` matches the lattice
/// `Guaranteed > Clipped > Diagnostic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuaranteeTier {
    /// A soft assumption concern (heavy missingness, drift, or clipping) has
    /// been detected. Do not make a guarantee-dependent decision on this
    /// output.
    Diagnostic,
    /// At least one observation was clipped into the declared support. The
    /// coverage guarantee holds for the clipped stream, not necessarily for
    /// the stream the caller intended to observe.
    Clipped,
    /// The full anytime-valid guarantee holds under the method's stated
    /// assumptions.
    Guaranteed,
}

impl GuaranteeTier {
    /// Combine two tiers, keeping the weaker (lower) of the two.
    ///
    /// Used when a result depends on more than one source of truth (e.g. a
    /// two-sample CS combining the tier of both arms).
    pub fn combine(self, other: Self) -> Self {
        self.min(other)
    }

    /// `true` if this tier is `Guaranteed`.
    pub fn is_guaranteed(self) -> bool {
        matches!(self, GuaranteeTier::Guaranteed)
    }
}

impl std::fmt::Display for GuaranteeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuaranteeTier::Guaranteed => write!(f, "GUARANTEED"),
            GuaranteeTier::Clipped => write!(f, "CLIPPED"),
            GuaranteeTier::Diagnostic => write!(f, "DIAGNOSTIC"),
        }
    }
}

impl Default for GuaranteeTier {
    fn default() -> Self {
        GuaranteeTier::Guaranteed
    }
}
