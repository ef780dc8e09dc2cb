//! Error types for the confidence-sequence engine.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! Two kinds of failure matter to the engine itself: [`Error::Config`]-family
//! variants raised synchronously at construction, and
//! [`Error::AssumptionViolation`] raised from `update()` only in
//! `clip_mode=error`. Everything else (missingness, drift, heavy clipping) is
//! soft and degrades the [`crate::GuaranteeTier`] instead of raising.
//!
//! # Agent-facing output
//!
//! Errors serialize to structured JSON via [`StructuredError`]:
//! ```json
//! {
//!   "code": 11,
//!   "category": "config",
//!   "message": "alpha must lie in (0,1), got 1.5",
//!   "recoverable": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid `StreamSpec`/`ABSpec`/atlas scenario configuration.
    Config,
    /// An observation violated the declared support under `clip_mode=error`.
    Assumption,
    /// File I/O and serialization errors at the config/CLI boundary.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Assumption => write!(f, "assumption"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the confidence-sequence engine.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19). Never arise from data.
    #[error("alpha must lie in (0,1), got {alpha}")]
    InvalidAlpha { alpha: f64 },

    #[error("invalid support ({a}, {b}): require a < b")]
    InvalidSupport { a: f64, b: f64 },

    #[error("{method} does not support kind={kind}")]
    UnsupportedKind { method: String, kind: String },

    #[error("unknown arm {arm:?}: expected \"A\" or \"B\"")]
    UnknownArm { arm: String },

    #[error("{method} requires two_sided={expected} (got {actual})")]
    UnsupportedSidedness {
        method: String,
        expected: bool,
        actual: bool,
    },

    #[error("invalid stopping rule: {0}")]
    InvalidStoppingRule(String),

    #[error("invalid scenario configuration: {0}")]
    InvalidScenario(String),

    #[error("p0 must lie in (0,1), got {p0}")]
    InvalidP0 { p0: f64 },

    // Assumption-violation errors (30-39). Raised only from `update()`.
    #[error("{method}: observation {value} at t={t} is outside support [{a}, {b}] (clip_mode=error)")]
    AssumptionViolation {
        method: String,
        t: u64,
        value: f64,
        a: f64,
        b: f64,
    },

    // I/O and serialization errors at the config/CLI boundary (60-69).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema error: {0}")]
    Schema(String),
}

impl Error {
    /// Returns the stable error code for this error.
    ///
    /// - 10-19: configuration errors
    /// - 30-39: assumption-violation errors
    /// - 60-69: I/O / serialization errors
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidAlpha { .. } => 10,
            Error::InvalidSupport { .. } => 11,
            Error::UnsupportedKind { .. } => 12,
            Error::UnknownArm { .. } => 13,
            Error::UnsupportedSidedness { .. } => 14,
            Error::InvalidStoppingRule(_) => 15,
            Error::InvalidScenario(_) => 16,
            Error::InvalidP0 { .. } => 17,
            Error::AssumptionViolation { .. } => 30,
            Error::Io(_) => 60,
            Error::Yaml(_) => 61,
            Error::Json(_) => 62,
            Error::Schema(_) => 63,
        }
    }

    /// Returns the error category for grouping and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidAlpha { .. }
            | Error::InvalidSupport { .. }
            | Error::UnsupportedKind { .. }
            | Error::UnknownArm { .. }
            | Error::UnsupportedSidedness { .. }
            | Error::InvalidStoppingRule(_)
            | Error::InvalidScenario(_)
            | Error::InvalidP0 { .. } => ErrorCategory::Config,

            Error::AssumptionViolation { .. } => ErrorCategory::Assumption,

            Error::Io(_) | Error::Yaml(_) | Error::Json(_) | Error::Schema(_) => {
                ErrorCategory::Io
            }
        }
    }

    /// Whether this error is recoverable by the caller without restarting
    /// the whole process (fix the spec, switch `clip_mode`, retry I/O).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::AssumptionViolation { .. } => true,
            _ => true,
        }
    }

    /// Exit code this error maps to on the CLI boundary (§6): 2 for config
    /// or schema errors, 3 for an assumption violation that escapes the
    /// stream, 1 for any other (I/O) failure.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 2,
            ErrorCategory::Assumption => 3,
            ErrorCategory::Io => 2,
        }
    }

    /// Human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::InvalidAlpha { .. } => "Choose an alpha strictly between 0 and 1.",
            Error::InvalidSupport { .. } => "Ensure the support lower bound is strictly less than the upper bound.",
            Error::UnsupportedKind { .. } => "Pick a method compatible with the spec's kind, or use the recommender.",
            Error::UnknownArm { .. } => "Tag two-sample observations with arm \"A\" or \"B\".",
            Error::UnsupportedSidedness { .. } => "Two-sample constructions in v1 require two_sided=true.",
            Error::InvalidStoppingRule(_) => "Check the stopping rule name and its parameters.",
            Error::InvalidScenario(_) => "Check the atlas scenario's generator and parameters.",
            Error::InvalidP0 { .. } => "Choose a p0 strictly between 0 and 1.",
            Error::AssumptionViolation { .. } => "Switch clip_mode to \"clip\", or filter out-of-range observations before calling update().",
            Error::Io(_) => "Check file permissions and that the path exists.",
            Error::Yaml(_) => "Check the YAML file's syntax against the StreamSpec/ABSpec schema.",
            Error::Json(_) => "Check the JSON payload's syntax.",
            Error::Schema(_) => "Check that the input matches the documented schema.",
        }
    }

    /// Short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::InvalidAlpha { .. }
            | Error::InvalidSupport { .. }
            | Error::UnsupportedKind { .. }
            | Error::UnknownArm { .. }
            | Error::UnsupportedSidedness { .. }
            | Error::InvalidStoppingRule(_)
            | Error::InvalidScenario(_)
            | Error::InvalidP0 { .. } => "Configuration Error",
            Error::AssumptionViolation { .. } => "Assumption Violation",
            Error::Io(_) => "I/O Error",
            Error::Yaml(_) => "YAML Parse Error",
            Error::Json(_) => "JSON Parse Error",
            Error::Schema(_) => "Schema Error",
        }
    }
}

/// Structured error response for JSON output / atlas manifests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
    pub recoverable: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();
        if let Error::AssumptionViolation { method, t, value, a, b } = err {
            context.insert("method".to_string(), serde_json::json!(method));
            context.insert("t".to_string(), serde_json::json!(t));
            context.insert("value".to_string(), serde_json::json!(value));
            context.insert("support".to_string(), serde_json::json!([a, b]));
        }
        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code))
    }
}

/// Format an error for human-readable stderr output.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };
    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
