//! Port trait definitions for the Application layer.
//!
//! Ports are the contracts infrastructure must fulfill. This file imports
//! only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

use anyhow::Result;

use crate::domain::credentials::CredentialSet;
use crate::domain::job::{JobObservation, JobRequest};
use crate::domain::state::InstallState;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// One external program invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec<'a> {
    pub program: &'a str,
    pub args: &'a [&'a str],
    /// Defaults to the caller's current directory when unset.
    pub current_dir: Option<&'a Path>,
    /// When set, the child runs with exactly this environment — a full
    /// map, never a delta. When unset the child inherits the process env.
    pub env: Option<&'a BTreeMap<String, String>>,
    /// When set, the child is killed once the timeout elapses. Long IaC
    /// runs leave this unset.
    pub timeout: Option<Duration>,
}

/// Captured result of a finished invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    /// Combined stdout-then-stderr, lossily decoded.
    pub output: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// A non-zero exit is reported through `CommandOutput`, not as an `Err`;
/// `Err` is reserved for spawn failures and timeouts.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, spec: &CommandSpec<'_>) -> Result<CommandOutput>;
}

// ── Credential Resolution Port ────────────────────────────────────────────────

/// Produces the run's credential set. Exactly two implementations exist:
/// direct input and shared-credentials-file lookup.
pub trait CredentialResolver {
    /// Resolve credentials once at startup.
    ///
    /// # Errors
    ///
    /// Returns a `CredentialError` before any remote call is made.
    fn resolve(&self) -> Result<CredentialSet>;
}

// ── Control Plane Ports ───────────────────────────────────────────────────────

/// Scalar configuration parameters in the remote store.
#[allow(async_fn_in_trait)]
pub trait ParameterStore {
    /// Upsert: unconditional last-writer-wins overwrite.
    async fn put_parameter(&self, path: &str, value: &str) -> Result<()>;

    /// Read a parameter; absent or empty values are an error
    /// (`StoreError::ParameterNotFound`).
    async fn get_parameter(&self, path: &str) -> Result<String>;
}

/// Secret values in the remote store.
#[allow(async_fn_in_trait)]
pub trait SecretStore {
    /// Create the secret if absent, otherwise update it in place.
    /// Returns the secret's locator (stable across updates).
    async fn upsert_secret(&self, name: &str, value: &str) -> Result<String>;
}

/// Structured records in named key-value tables.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn put_record(&self, table: &str, fields: &[(&str, &str)]) -> Result<()>;
}

/// Remote batch execution service.
#[allow(async_fn_in_trait)]
pub trait JobService {
    /// Submit a job; returns the remote job id.
    async fn submit(&self, request: &JobRequest) -> Result<String>;

    /// Describe a submitted job. `None` means the service no longer
    /// knows the job.
    async fn describe(&self, job_id: &str) -> Result<Option<JobObservation>>;
}

/// Identity service: who am I deploying as.
#[allow(async_fn_in_trait)]
pub trait IdentityService {
    async fn account_id(&self) -> Result<String>;
}

/// Composite trait — any type implementing the five control-plane ports.
pub trait ControlPlane:
    ParameterStore + SecretStore + RecordStore + JobService + IdentityService
{
}

impl<T> ControlPlane for T where
    T: ParameterStore + SecretStore + RecordStore + JobService + IdentityService
{
}

// ── Artifact Fetch Port ───────────────────────────────────────────────────────

/// Materializes a stage's deployable definitions on disk.
#[allow(async_fn_in_trait)]
pub trait ArtifactFetcher {
    /// Fetch `source` into a new checkout under `into`.
    async fn fetch(&self, source: &str, into: &Path) -> Result<()>;
}

// ── Secret Sealing Port ───────────────────────────────────────────────────────

/// Seals a sensitive value before it is registered remotely.
pub trait SecretSealer {
    /// Returns the sealed, transport-safe representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be sealed.
    fn seal(&self, plaintext: &str) -> Result<String>;
}

// ── Local Filesystem Port ─────────────────────────────────────────────────────

/// Abstracts the handful of local filesystem operations the services need.
pub trait LocalFs {
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

// ── Install State Port ────────────────────────────────────────────────────────

/// Persistence for per-stage success records.
#[allow(async_fn_in_trait)]
pub trait InstallStateStore {
    async fn load(&self) -> Result<Option<InstallState>>;
    async fn save(&self, state: &InstallState) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Shared value types ────────────────────────────────────────────────────────

/// Local directories the orchestrator works in.
#[derive(Debug, Clone)]
pub struct WorkDirs {
    /// Where stage artifacts are checked out.
    pub infra_dir: PathBuf,
    /// Terraform provider plugin cache shared across stages.
    pub plugin_cache_dir: PathBuf,
}
