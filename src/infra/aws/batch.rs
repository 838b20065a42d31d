//! AWS Batch adapter.

use anyhow::{Context, Result};
use aws_sdk_batch::types::{ContainerOverrides, JobStatus as RemoteJobStatus, KeyValuePair};

use super::AwsControlPlane;
use crate::application::ports::JobService;
use crate::domain::job::{JobObservation, JobRequest, JobStatus};

impl JobService for AwsControlPlane {
    async fn submit(&self, request: &JobRequest) -> Result<String> {
        let environment: Vec<KeyValuePair> = request
            .env
            .iter()
            .map(|(k, v)| {
                KeyValuePair::builder()
                    .name(k.as_str())
                    .value(v.as_str())
                    .build()
            })
            .collect();
        let overrides = ContainerOverrides::builder()
            .set_environment(Some(environment))
            .build();
        let output = self
            .batch
            .submit_job()
            .job_name(request.name.as_str())
            .job_queue(request.queue.as_str())
            .job_definition(request.definition.as_str())
            .container_overrides(overrides)
            .send()
            .await
            .with_context(|| format!("submitting batch job '{}'", request.name))?;
        Ok(output.job_id().unwrap_or_default().to_owned())
    }

    async fn describe(&self, job_id: &str) -> Result<Option<JobObservation>> {
        let output = self
            .batch
            .describe_jobs()
            .jobs(job_id)
            .send()
            .await
            .with_context(|| format!("describing batch job '{job_id}'"))?;
        let Some(job) = output.jobs().first() else {
            return Ok(None);
        };
        let status = match job.status() {
            Some(RemoteJobStatus::Succeeded) => JobStatus::Succeeded,
            Some(RemoteJobStatus::Failed) => JobStatus::Failed,
            Some(RemoteJobStatus::Submitted) => JobStatus::Submitted,
            Some(RemoteJobStatus::Pending) => JobStatus::Pending,
            Some(RemoteJobStatus::Runnable) => JobStatus::Runnable,
            Some(RemoteJobStatus::Starting) => JobStatus::Starting,
            // Unknown statuses are treated as still in flight.
            _ => JobStatus::Running,
        };
        Ok(Some(JobObservation {
            status,
            reason: job.status_reason().map(str::to_owned),
        }))
    }
}
