//! Post-deploy application registration.
//!
//! Resolves the record tables from parameters the deployed infrastructure
//! published, registers the first account and its API key, and seeds the
//! configuration table. Every write is keyed by a fresh id generated
//! here, never by the store.

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::application::ports::{ParameterStore, ProgressReporter, RecordStore, SecretSealer};
use crate::assets;
use crate::domain::apikey;
use crate::domain::config::InstallConfig;
use crate::domain::params;

/// Outcome of a successful registration, printed by the command layer.
#[derive(Debug)]
pub struct ConfigureOutcome {
    /// Endpoint the platform CLI is pointed at during `tli setup`.
    pub setup_endpoint: String,
    pub user_id: String,
    /// Plaintext API key — shown once, stored only as a SHA-256 digest.
    pub api_key: String,
}

/// Register the application records after all stages have applied.
///
/// # Errors
///
/// Fails on the first parameter read or record write that fails; safe to
/// re-run (records for fresh ids accumulate, configuration rows are
/// keyed by `parameter_id` and overwrite).
pub async fn register_application(
    control: &(impl ParameterStore + RecordStore),
    sealer: &impl SecretSealer,
    reporter: &impl ProgressReporter,
    config: &InstallConfig,
) -> Result<ConfigureOutcome> {
    reporter.step("registering first account");
    let user_table = control.get_parameter(params::DYNAMO_USER_TABLE).await?;
    let user_id = Uuid::new_v4().to_string();
    control
        .put_record(
            &user_table,
            &[
                ("user_id", &user_id),
                ("account_type", "Team"),
                ("name", &config.user_name),
            ],
        )
        .await?;

    let api_key_table = control.get_parameter(params::DYNAMO_API_KEY_TABLE).await?;
    let key_id = Uuid::new_v4().to_string();
    let api_key = apikey::generate(&mut rand::thread_rng());
    let api_key_hash = apikey::sha256_hex(api_key.as_bytes());
    control
        .put_record(
            &api_key_table,
            &[
                ("key_id", &key_id),
                ("api_key", &api_key_hash),
                ("user_id", &user_id),
            ],
        )
        .await?;

    reporter.step("seeding application configuration");
    let config_table = control
        .get_parameter(params::DYNAMO_CONFIGURATION_TABLE)
        .await?;

    put_config_row(control, &config_table, "open_ai_model", &config.open_ai_model).await?;

    let cli_bucket = control.get_parameter(params::CLI_FILES_BUCKET).await?;
    put_config_row(control, &config_table, "cli_files_bucket_name", &cli_bucket).await?;

    let sealed_key = sealer
        .seal(&config.open_ai_api_key)
        .context("sealing model API key")?;
    put_config_row(control, &config_table, "open_ai_api_key", &sealed_key).await?;

    put_config_row(
        control,
        &config_table,
        "scan_system_prompt",
        assets::SCAN_SYSTEM_PROMPT,
    )
    .await?;

    let job_queue = control.get_parameter(params::SCAN_JOB_QUEUE).await?;
    put_config_row(control, &config_table, "security-scan-job-queue", &job_queue).await?;

    put_config_row(
        control,
        &config_table,
        "report_html_template",
        assets::REPORT_HTML_TEMPLATE,
    )
    .await?;

    let task_endpoint = control.get_parameter(params::TASK_API_ENDPOINT).await?;
    put_config_row(control, &config_table, "task_endpoint", &task_endpoint).await?;

    let report_bucket = control.get_parameter(params::REPORT_BUCKET).await?;
    put_config_row(control, &config_table, "report_bucket_name", &report_bucket).await?;

    let report_domain = control.get_parameter(params::REPORT_BUCKET_DOMAIN).await?;
    put_config_row(control, &config_table, "report_bucket_domain", &report_domain).await?;

    let job_definition = control.get_parameter(params::SCAN_JOB_DEFINITION).await?;
    put_config_row(
        control,
        &config_table,
        "security-scan-job-definition",
        &job_definition,
    )
    .await?;

    let setup_endpoint = control.get_parameter(params::ACCOUNT_API_ENDPOINT).await?;
    reporter.success("application registered");

    Ok(ConfigureOutcome {
        setup_endpoint,
        user_id,
        api_key,
    })
}

async fn put_config_row(
    records: &impl RecordStore,
    table: &str,
    parameter_id: &str,
    value: &str,
) -> Result<()> {
    records
        .put_record(table, &[("parameter_id", parameter_id), ("value", value)])
        .await
        .with_context(|| format!("registering configuration row '{parameter_id}'"))
}
