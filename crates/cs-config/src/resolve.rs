//! Configuration path resolution.
//!
//! Resolution order: explicit path (e.g. a CLI argument) → environment
//! variable → built-in default (`None`, meaning "no file, caller must
//! construct a spec in code").

use std::path::{Path, PathBuf};

/// Where a configuration path ultimately came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided (CLI argument, direct call).
    Explicit,
    /// Found via an environment variable.
    Environment,
    /// No path resolved; caller falls back to a built-in default.
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::Default => write!(f, "built-in default"),
        }
    }
}

/// A resolved path plus the source it came from, for diagnostics/logging.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPath {
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve a single config path: explicit path → environment variable →
/// default (`None`).
///
/// The explicit path and the environment variable's value are both trusted
/// verbatim if present — existence is checked by the caller when it opens
/// the file, not here, so resolution itself never touches the filesystem.
pub fn resolve_path(explicit: Option<&Path>, env_var: &str) -> ResolvedPath {
    if let Some(path) = explicit {
        return ResolvedPath {
            path: Some(path.to_path_buf()),
            source: ConfigSource::Explicit,
        };
    }
    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return ResolvedPath {
                path: Some(PathBuf::from(env_path)),
                source: ConfigSource::Environment,
            };
        }
    }
    ResolvedPath {
        path: None,
        source: ConfigSource::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let r = resolve_path(Some(Path::new("/tmp/spec.yaml")), "CS_SPEC_NONEXISTENT_VAR");
        assert_eq!(r.source, ConfigSource::Explicit);
        assert_eq!(r.path, Some(PathBuf::from("/tmp/spec.yaml")));
    }

    #[test]
    fn falls_back_to_default_when_unset() {
        let r = resolve_path(None, "CS_SPEC_DEFINITELY_UNSET_VAR_XYZ");
        assert_eq!(r.source, ConfigSource::Default);
        assert!(r.path.is_none());
    }
}
