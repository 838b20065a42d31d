//! Credential resolver implementations.
//!
//! Exactly two sources exist: a pre-filled set (direct input) and a
//! profile lookup in the shared AWS credentials file. Both are selected
//! once at startup and held for the run.

use std::path::PathBuf;

use anyhow::Result;
use ini::Ini;

use crate::application::ports::CredentialResolver;
use crate::domain::credentials::CredentialSet;
use crate::domain::error::CredentialError;

// ── Direct input ──────────────────────────────────────────────────────────────

/// Pass-through resolver; always succeeds.
pub struct StaticCredentials {
    set: CredentialSet,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(set: CredentialSet) -> Self {
        Self { set }
    }
}

impl CredentialResolver for StaticCredentials {
    fn resolve(&self) -> Result<CredentialSet> {
        Ok(self.set.clone())
    }
}

// ── Shared credentials file ───────────────────────────────────────────────────

/// Looks up a named profile in `~/.aws/credentials` (INI format).
pub struct SharedCredentialsFile {
    profile: String,
    region: String,
    path: PathBuf,
}

impl SharedCredentialsFile {
    /// Resolver for the default credentials file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new(profile: impl Into<String>, region: impl Into<String>) -> Result<Self> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(
            profile,
            region,
            home.join(".aws").join("credentials"),
        ))
    }

    /// Resolver with an explicit file path (used in tests).
    #[must_use]
    pub fn with_path(
        profile: impl Into<String>,
        region: impl Into<String>,
        path: PathBuf,
    ) -> Self {
        Self {
            profile: profile.into(),
            region: region.into(),
            path,
        }
    }
}

impl CredentialResolver for SharedCredentialsFile {
    fn resolve(&self) -> Result<CredentialSet> {
        if !self.path.exists() {
            return Err(CredentialError::FileMissing {
                path: self.path.clone(),
            }
            .into());
        }
        let file = Ini::load_from_file(&self.path).map_err(|e| CredentialError::Unreadable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let section = file
            .section(Some(self.profile.as_str()))
            .ok_or_else(|| CredentialError::ProfileNotFound {
                profile: self.profile.clone(),
            })?;

        let session_token = section
            .get("aws_session_token")
            .filter(|t| !t.is_empty())
            .map(str::to_owned);

        Ok(CredentialSet {
            access_key_id: section
                .get("aws_access_key_id")
                .unwrap_or_default()
                .to_owned(),
            secret_access_key: section
                .get("aws_secret_access_key")
                .unwrap_or_default()
                .to_owned(),
            session_token,
            region: self.region.clone(),
        })
    }
}
