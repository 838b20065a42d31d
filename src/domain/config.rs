//! Install configuration.
//!
//! Field names match the JSON config file the installer accepts with
//! `--config`; the same struct is filled by the interactive prompts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::credentials::CredentialSet;
use crate::domain::error::ConfigError;

/// Length the AES key must have (AES-256, one byte per character).
pub const AES_SECRET_LEN: usize = 32;

/// Everything the installer needs for one run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InstallConfig {
    #[serde(default)]
    pub aws_access_key_id: String,
    #[serde(default)]
    pub aws_secret_access_key: String,
    #[serde(default)]
    pub aws_session_token: String,
    /// Named profile in `~/.aws/credentials`; used when no inline keys
    /// are given.
    #[serde(default)]
    pub aws_profile: String,
    pub aws_region: String,
    pub vpc_id: String,
    pub subnet_id: String,
    /// Symmetric key used to seal the model API key. Exactly 32 chars.
    pub aes_secret: String,
    pub user_name: String,
    pub open_ai_model: String,
    pub open_ai_api_key: String,
    /// Optional bin directories prepended to each stage's PATH.
    #[serde(default)]
    pub terraform_bin_dir: Option<PathBuf>,
    #[serde(default)]
    pub terragrunt_bin_dir: Option<PathBuf>,
    #[serde(default)]
    pub node_bin_dir: Option<PathBuf>,
}

/// Which credential source the config selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Inline access key / secret key / optional token.
    DirectInput(CredentialSet),
    /// Profile lookup in the shared AWS credentials file.
    ProfileLookup { profile: String, region: String },
}

impl InstallConfig {
    /// Validate the configuration before any remote call is made.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("aws_region", &self.aws_region),
            ("vpc_id", &self.vpc_id),
            ("subnet_id", &self.subnet_id),
            ("user_name", &self.user_name),
            ("open_ai_model", &self.open_ai_model),
            ("open_ai_api_key", &self.open_ai_api_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { name });
            }
        }
        if self.aes_secret.len() != AES_SECRET_LEN {
            return Err(ConfigError::BadAesSecretLength {
                len: self.aes_secret.len(),
            });
        }
        self.credential_source().map(|_| ())
    }

    /// Select the credential source: inline keys win over a profile.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoCredentialSource` when neither is set.
    pub fn credential_source(&self) -> Result<CredentialSource, ConfigError> {
        if !self.aws_access_key_id.is_empty() && !self.aws_secret_access_key.is_empty() {
            let session_token = if self.aws_session_token.is_empty() {
                None
            } else {
                Some(self.aws_session_token.clone())
            };
            return Ok(CredentialSource::DirectInput(CredentialSet {
                access_key_id: self.aws_access_key_id.clone(),
                secret_access_key: self.aws_secret_access_key.clone(),
                session_token,
                region: self.aws_region.clone(),
            }));
        }
        if !self.aws_profile.is_empty() {
            return Ok(CredentialSource::ProfileLookup {
                profile: self.aws_profile.clone(),
                region: self.aws_region.clone(),
            });
        }
        Err(ConfigError::NoCredentialSource)
    }

    /// Tool bin directories to append to each stage's PATH, in order.
    #[must_use]
    pub fn tool_bin_dirs(&self) -> Vec<PathBuf> {
        [
            self.terraform_bin_dir.clone(),
            self.terragrunt_bin_dir.clone(),
            self.node_bin_dir.clone(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
