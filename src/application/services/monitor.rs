//! Batch job monitor — submit a unit of remote work and wait for a
//! terminal state.
//!
//! The polling loop is the one place in the installer that suspends: one
//! biased `select!` per iteration over the cancellation token and the
//! interval tick. Cancellation is cooperative — once the token fires, no
//! further remote polls are issued. The remote job itself is never
//! cancelled (fire-and-forget once submitted), and there is no hard
//! timeout beyond the token: a caller wanting one layers it on top.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{JobService, ProgressReporter};
use crate::domain::error::JobError;
use crate::domain::job::{JobRequest, JobStatus};

/// Fixed poll interval.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Submit `request` and block until the job reaches a terminal state or
/// `cancel` fires.
///
/// # Errors
///
/// Returns a [`JobError`] for the terminal failure cases (no job id, job
/// vanished, job failed, cancelled), or the underlying remote error for
/// a submit/describe call that fails outright.
pub async fn submit_and_await(
    jobs: &impl JobService,
    request: &JobRequest,
    cancel: &CancellationToken,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let job_id = jobs
        .submit(request)
        .await
        .with_context(|| format!("submitting job '{}'", request.name))?;
    if job_id.is_empty() {
        return Err(JobError::MissingJobId {
            name: request.name.clone(),
        }
        .into());
    }
    reporter.step(&format!("submitted job '{}' as {job_id}", request.name));

    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // Biased: a fired token wins over a due tick, so no poll is
        // issued after cancellation.
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(JobError::Cancelled { job_id }.into());
            }
            _ = ticker.tick() => {}
        }

        let observed = jobs
            .describe(&job_id)
            .await
            .with_context(|| format!("describing job '{job_id}'"))?;
        let Some(observed) = observed else {
            return Err(JobError::NotFound { job_id }.into());
        };

        match observed.status {
            JobStatus::Succeeded => {
                reporter.success(&format!("job {job_id} succeeded"));
                return Ok(());
            }
            JobStatus::Failed => {
                return Err(JobError::Failed {
                    job_id,
                    reason: observed
                        .reason
                        .unwrap_or_else(|| "unknown reason".to_owned()),
                }
                .into());
            }
            other => reporter.step(&format!("job {job_id} is {}", other.as_str())),
        }
    }
}
