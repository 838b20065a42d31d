//! Per-stage environment assembly.
//!
//! The merge is pure: the inherited process environment is an explicit
//! input, never read ambiently, so the result is deterministic and
//! testable without process-level mocking. Later merges override earlier
//! ones; each stage builds its own copy from the same base.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::credentials::CredentialSet;

/// The full environment an external tool invocation runs with.
///
/// Always passed to the command runner as a complete map, not a delta.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentContext {
    vars: BTreeMap<String, String>,
}

impl EnvironmentContext {
    /// Start from an explicit base environment (usually `std::env::vars()`
    /// collected by the caller).
    #[must_use]
    pub fn from_base(base: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: base.into_iter().collect(),
        }
    }

    /// Append tool bin directories to `PATH`, preserving existing entries.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot appear in `PATH` (contains
    /// the platform path separator).
    pub fn extend_path(mut self, dirs: &[PathBuf]) -> Result<Self> {
        if dirs.is_empty() {
            return Ok(self);
        }
        let existing = self.vars.get("PATH").cloned().unwrap_or_default();
        let parts = std::env::split_paths(&existing)
            .chain(dirs.iter().cloned())
            .collect::<Vec<_>>();
        let joined = std::env::join_paths(parts).context("joining PATH entries")?;
        self.vars
            .insert("PATH".to_owned(), joined.to_string_lossy().into_owned());
        Ok(self)
    }

    /// Export the credential set as AWS environment variables.
    #[must_use]
    pub fn with_credentials(mut self, creds: &CredentialSet) -> Self {
        for (key, value) in creds.env_exports() {
            self.vars.insert(key.to_owned(), value);
        }
        self
    }

    /// Set one variable, overriding any earlier value.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_owned(), value.into());
        self
    }

    /// Borrow the assembled variable map.
    #[must_use]
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Consume the context, yielding the variable map.
    #[must_use]
    pub fn into_vars(self) -> BTreeMap<String, String> {
        self.vars
    }
}
