//! Shared in-memory port implementations for unit tests.
//!
//! Provides a canned control plane, a recording command runner, a
//! directory-creating artifact fetcher, and a scripted job service so
//! each test file doesn't have to re-define the same boilerplate.

#![allow(dead_code)] // Not every test module uses every mock
#![allow(clippy::expect_used)]

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use tvo_installer::application::ports::{
    ArtifactFetcher, CommandOutput, CommandRunner, CommandSpec, IdentityService,
    InstallStateStore, JobService, ParameterStore, ProgressReporter, RecordStore, SecretStore,
};
use tvo_installer::domain::error::StoreError;
use tvo_installer::domain::job::{JobObservation, JobRequest, JobStatus};
use tvo_installer::domain::state::InstallState;

use crate::helpers::exit_status;

/// Event journal shared between mocks to assert cross-port ordering.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

// ── Mock: progress reporter ──────────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

// ── Mock: in-memory control plane ────────────────────────────────────────────

/// In-memory parameter/secret/record stores plus a fixed identity.
///
/// Secret locators are derived from the name, so repeated upserts return
/// the same locator — mirroring the remote contract.
#[derive(Default)]
pub struct MemoryControlPlane {
    pub params: Mutex<BTreeMap<String, String>>,
    pub secrets: Mutex<BTreeMap<String, String>>,
    pub records: Mutex<Vec<(String, BTreeMap<String, String>)>>,
    pub jobs: Option<ScriptedJobService>,
    journal: Option<Journal>,
}

impl MemoryControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::default()
        }
    }

    pub fn with_jobs(jobs: ScriptedJobService) -> Self {
        Self {
            jobs: Some(jobs),
            ..Self::default()
        }
    }

    pub fn seed_parameter(&self, path: &str, value: &str) {
        self.params
            .lock()
            .expect("lock")
            .insert(path.to_owned(), value.to_owned());
    }

    pub fn locator(name: &str) -> String {
        format!("arn:aws:secretsmanager:::secret{name}")
    }

    /// Records in `table` as field maps.
    pub fn records_in(&self, table: &str) -> Vec<BTreeMap<String, String>> {
        self.records
            .lock()
            .expect("lock")
            .iter()
            .filter(|(t, _)| t == table)
            .map(|(_, fields)| fields.clone())
            .collect()
    }

    fn log(&self, entry: String) {
        if let Some(journal) = &self.journal {
            journal.lock().expect("lock").push(entry);
        }
    }
}

impl ParameterStore for MemoryControlPlane {
    async fn put_parameter(&self, path: &str, value: &str) -> Result<()> {
        self.log(format!("put:{path}"));
        self.params
            .lock()
            .expect("lock")
            .insert(path.to_owned(), value.to_owned());
        Ok(())
    }

    async fn get_parameter(&self, path: &str) -> Result<String> {
        match self.params.lock().expect("lock").get(path) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(StoreError::ParameterNotFound {
                path: path.to_owned(),
            }
            .into()),
        }
    }
}

impl SecretStore for MemoryControlPlane {
    async fn upsert_secret(&self, name: &str, value: &str) -> Result<String> {
        self.log(format!("secret:{name}"));
        self.secrets
            .lock()
            .expect("lock")
            .insert(name.to_owned(), value.to_owned());
        Ok(Self::locator(name))
    }
}

impl RecordStore for MemoryControlPlane {
    async fn put_record(&self, table: &str, fields: &[(&str, &str)]) -> Result<()> {
        let fields: BTreeMap<String, String> = fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        self.records
            .lock()
            .expect("lock")
            .push((table.to_owned(), fields));
        Ok(())
    }
}

impl IdentityService for MemoryControlPlane {
    async fn account_id(&self) -> Result<String> {
        Ok("123456789012".to_owned())
    }
}

impl JobService for MemoryControlPlane {
    async fn submit(&self, request: &JobRequest) -> Result<String> {
        self.jobs
            .as_ref()
            .expect("no job service scripted")
            .submit(request)
            .await
    }

    async fn describe(&self, job_id: &str) -> Result<Option<JobObservation>> {
        self.jobs
            .as_ref()
            .expect("no job service scripted")
            .describe(job_id)
            .await
    }
}

// ── Mock: recording command runner ───────────────────────────────────────────

/// One recorded invocation, with owned copies of everything.
#[derive(Debug, Clone)]
pub struct RecordedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub env: Option<BTreeMap<String, String>>,
}

type FailPredicate = Box<dyn Fn(&RecordedCommand) -> bool + Send + Sync>;

/// Records every call; succeeds unless the failure predicate matches.
pub struct RecordingRunner {
    pub calls: Mutex<Vec<RecordedCommand>>,
    fail_on: Option<FailPredicate>,
    journal: Option<Journal>,
}

impl RecordingRunner {
    pub fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            journal: None,
        }
    }

    pub fn ok_with_journal(journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::ok()
        }
    }

    pub fn failing_when(pred: impl Fn(&RecordedCommand) -> bool + Send + Sync + 'static) -> Self {
        Self {
            fail_on: Some(Box::new(pred)),
            ..Self::ok()
        }
    }

    /// Recorded terragrunt invocations (skips the version check).
    pub fn iac_calls(&self) -> Vec<RecordedCommand> {
        self.calls
            .lock()
            .expect("lock")
            .iter()
            .filter(|c| c.program == "terragrunt" && c.args.first().map(String::as_str) == Some("run-all"))
            .cloned()
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec<'_>) -> Result<CommandOutput> {
        let recorded = RecordedCommand {
            program: spec.program.to_owned(),
            args: spec.args.iter().map(|a| (*a).to_owned()).collect(),
            current_dir: spec.current_dir.map(Path::to_path_buf),
            env: spec.env.cloned(),
        };
        if let Some(journal) = &self.journal {
            journal
                .lock()
                .expect("lock")
                .push(format!("run:{} {}", recorded.program, recorded.args.join(" ")));
        }
        let failed = self.fail_on.as_ref().is_some_and(|pred| pred(&recorded));
        self.calls.lock().expect("lock").push(recorded);
        Ok(CommandOutput {
            status: exit_status(i32::from(failed)),
            output: if failed { "boom".to_owned() } else { String::new() },
        })
    }
}

// ── Mock: artifact fetcher ───────────────────────────────────────────────────

/// Creates the checkout directory a real `git clone` would, and records
/// every fetched source.
pub struct DirFetcher {
    pub fetched: Mutex<Vec<String>>,
    /// When false, simulates a fetch that leaves no checkout behind.
    pub create_checkout: bool,
}

impl DirFetcher {
    pub fn new() -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
            create_checkout: true,
        }
    }

    pub fn broken() -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
            create_checkout: false,
        }
    }

    pub fn fetched_sources(&self) -> Vec<String> {
        self.fetched.lock().expect("lock").clone()
    }
}

impl ArtifactFetcher for DirFetcher {
    async fn fetch(&self, source: &str, into: &Path) -> Result<()> {
        self.fetched.lock().expect("lock").push(source.to_owned());
        if self.create_checkout {
            let name = source
                .rsplit('/')
                .next()
                .and_then(|n| n.strip_suffix(".git"))
                .expect("stage source is a git url");
            std::fs::create_dir_all(into.join(name))?;
        }
        Ok(())
    }
}

// ── Mock: scripted job service ───────────────────────────────────────────────

pub fn obs(status: JobStatus) -> JobObservation {
    JobObservation {
        status,
        reason: None,
    }
}

pub fn obs_failed(reason: &str) -> JobObservation {
    JobObservation {
        status: JobStatus::Failed,
        reason: Some(reason.to_owned()),
    }
}

/// Plays back a scripted sequence of observations; counts polls.
pub struct ScriptedJobService {
    pub job_id: String,
    script: Mutex<VecDeque<JobObservation>>,
    pub polls: Mutex<u32>,
    pub submitted: Mutex<Vec<JobRequest>>,
    /// Fired right after the first describe — models an external
    /// cancellation racing the polling loop.
    cancel_on_describe: Option<CancellationToken>,
    missing: bool,
}

impl ScriptedJobService {
    pub fn with_statuses(statuses: Vec<JobObservation>) -> Self {
        Self {
            job_id: "job-1".to_owned(),
            script: Mutex::new(statuses.into()),
            polls: Mutex::new(0),
            submitted: Mutex::new(Vec::new()),
            cancel_on_describe: None,
            missing: false,
        }
    }

    /// Remote stays RUNNING forever; `token` fires after the first poll.
    pub fn running_forever_cancelling(token: CancellationToken) -> Self {
        Self {
            cancel_on_describe: Some(token),
            ..Self::with_statuses(Vec::new())
        }
    }

    /// Describe reports the job as unknown.
    pub fn missing_job() -> Self {
        Self {
            missing: true,
            ..Self::with_statuses(Vec::new())
        }
    }

    /// Submit succeeds but returns an empty job id.
    pub fn empty_job_id() -> Self {
        Self {
            job_id: String::new(),
            ..Self::with_statuses(Vec::new())
        }
    }

    pub fn poll_count(&self) -> u32 {
        *self.polls.lock().expect("lock")
    }
}

impl JobService for ScriptedJobService {
    async fn submit(&self, request: &JobRequest) -> Result<String> {
        self.submitted.lock().expect("lock").push(request.clone());
        Ok(self.job_id.clone())
    }

    async fn describe(&self, _job_id: &str) -> Result<Option<JobObservation>> {
        *self.polls.lock().expect("lock") += 1;
        if let Some(token) = &self.cancel_on_describe {
            token.cancel();
        }
        if self.missing {
            return Ok(None);
        }
        let next = self
            .script
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| obs(JobStatus::Running));
        Ok(Some(next))
    }
}

// ── Mock: in-memory state store ──────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStateStore {
    pub state: Mutex<Option<InstallState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied_stages(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("lock")
            .as_ref()
            .map(|s| s.stages.iter().map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    }
}

impl InstallStateStore for MemoryStateStore {
    async fn load(&self) -> Result<Option<InstallState>> {
        Ok(self.state.lock().expect("lock").clone())
    }

    async fn save(&self, state: &InstallState) -> Result<()> {
        *self.state.lock().expect("lock") = Some(state.clone());
        Ok(())
    }
}
