//! Remote batch job types.

/// Job status as reported by the batch execution service.
///
/// Only `Succeeded` and `Failed` are terminal; everything else means the
/// job is still moving through the remote scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Whether no further transitions can occur.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Submitted => "SUBMITTED",
            JobStatus::Pending => "PENDING",
            JobStatus::Runnable => "RUNNABLE",
            JobStatus::Starting => "STARTING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
        }
    }
}

/// A unit of remote work to submit.
#[derive(Debug, Clone)]
pub struct JobRequest {
    pub name: String,
    pub queue: String,
    pub definition: String,
    /// Environment variables passed as the container override.
    pub env: Vec<(String, String)>,
}

/// One polling observation of a submitted job.
#[derive(Debug, Clone)]
pub struct JobObservation {
    pub status: JobStatus,
    /// Remote-reported reason, usually only present on failure.
    pub reason: Option<String>,
}
