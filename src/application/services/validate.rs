//! Post-install validation job.
//!
//! Submits a throwaway scan job against the freshly deployed queue and
//! waits for it to finish, proving the batch plumbing end to end.

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{JobService, ParameterStore, ProgressReporter};
use crate::application::services::monitor;
use crate::domain::job::JobRequest;
use crate::domain::params;

/// Name the validation job is submitted under.
pub const VALIDATION_JOB_NAME: &str = "tvo-install-validation";

/// Resolve the job queue and definition from the store, submit the
/// validation job, and wait for a terminal state.
///
/// # Errors
///
/// Propagates parameter-read failures and every terminal [`monitor`]
/// error, including cancellation via `cancel`.
pub async fn run_validation_job(
    control: &(impl ParameterStore + JobService),
    cancel: &CancellationToken,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("resolving validation job queue and definition");
    let queue = control.get_parameter(params::SCAN_JOB_QUEUE).await?;
    let definition = control.get_parameter(params::SCAN_JOB_DEFINITION).await?;

    let request = JobRequest {
        name: VALIDATION_JOB_NAME.to_owned(),
        queue,
        definition,
        env: vec![("TVO_INSTALL_CHECK".to_owned(), "true".to_owned())],
    };
    monitor::submit_and_await(control, &request, cancel, reporter).await
}
