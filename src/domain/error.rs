//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator. Services attach stage/step
//! context with `anyhow::Context`; these enums carry the machine-readable
//! cases callers and tests match on.

use std::path::PathBuf;

use thiserror::Error;

// ── Credential errors ─────────────────────────────────────────────────────────

/// Errors raised while resolving AWS credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credentials file not found: {}", path.display())]
    FileMissing { path: PathBuf },

    #[error("profile '{profile}' not found in credentials file")]
    ProfileNotFound { profile: String },

    #[error("cannot parse credentials file {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}

// ── Remote store errors ───────────────────────────────────────────────────────

/// Errors raised by the remote configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("parameter '{path}' does not exist or has no value")]
    ParameterNotFound { path: String },
}

// ── Batch job errors ──────────────────────────────────────────────────────────

/// Terminal outcomes of waiting on a remote batch job.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("job service returned no job id for '{name}'")]
    MissingJobId { name: String },

    #[error("job '{job_id}' no longer exists")]
    NotFound { job_id: String },

    #[error("job '{job_id}' failed: {reason}")]
    Failed { job_id: String, reason: String },

    #[error("cancelled while waiting for job '{job_id}'")]
    Cancelled { job_id: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while validating the install configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("aes_secret must be exactly 32 characters, got {len}")]
    BadAesSecretLength { len: usize },

    #[error("required setting '{name}' is empty")]
    MissingField { name: &'static str },

    #[error("no credential source: set aws_profile or aws_access_key_id/aws_secret_access_key")]
    NoCredentialSource,
}
