//! Provisioning orchestrator — the deploy use-case.
//!
//! Drives the fixed stage sequence strictly one after another: later
//! stages consume configuration written by earlier ones, and the remote
//! infrastructure state store does not support concurrent applies. A
//! failure at any step aborts the whole run — no rollback, no
//! skip-ahead; re-running converges because every remote write is an
//! upsert.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use chrono::Utc;

use crate::application::ports::{
    ArtifactFetcher, CommandRunner, CommandSpec, IdentityService, InstallStateStore, LocalFs,
    ParameterStore, ProgressReporter, SecretStore, WorkDirs,
};
use crate::domain::config::InstallConfig;
use crate::domain::credentials::CredentialSet;
use crate::domain::environment::EnvironmentContext;
use crate::domain::params;
use crate::domain::stage::{IacPhase, STAGES, StageDescriptor, StageProgress};
use crate::domain::state::InstallState;

/// The IaC engine every stage is reconciled with.
const IAC_PROGRAM: &str = "terragrunt";

/// Deployment stage tag exported to every IaC run.
const DEPLOYMENT_STAGE: &str = "prod";

/// Timeout for quick tool sanity checks; IaC runs get none.
const TOOL_CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only inputs shared by every stage of one run.
pub struct DeployInputs<'a> {
    pub credentials: &'a CredentialSet,
    pub config: &'a InstallConfig,
    pub dirs: &'a WorkDirs,
    /// The inherited process environment, passed explicitly so the merge
    /// is deterministic and testable.
    pub base_env: BTreeMap<String, String>,
    /// Turns on verbose engine logging (TG_LOG / TF_LOG).
    pub debug: bool,
}

/// Deploy all stages in order, recording each success before advancing.
///
/// # Errors
///
/// Returns an error naming the failing stage and step; already-applied
/// stages are left as-is.
pub async fn deploy_stages(
    runner: &impl CommandRunner,
    fetcher: &impl ArtifactFetcher,
    control: &(impl ParameterStore + SecretStore + IdentityService),
    fs: &impl LocalFs,
    state_store: &impl InstallStateStore,
    reporter: &impl ProgressReporter,
    inputs: &DeployInputs<'_>,
) -> Result<()> {
    verify_toolchain(runner, inputs).await?;

    let account_id = control
        .account_id()
        .await
        .context("resolving AWS account id")?;

    fs.create_dir_all(&inputs.dirs.infra_dir)
        .with_context(|| format!("creating {}", inputs.dirs.infra_dir.display()))?;
    fs.create_dir_all(&inputs.dirs.plugin_cache_dir)
        .with_context(|| format!("creating {}", inputs.dirs.plugin_cache_dir.display()))?;

    let mut state = state_store
        .load()
        .await
        .context("loading install state")?
        .unwrap_or_else(|| InstallState::new(Utc::now()));

    for stage in STAGES {
        run_stage(runner, fetcher, control, fs, reporter, inputs, stage, &account_id)
            .await
            .with_context(|| format!("stage '{}' failed", stage.name))?;
        state.record(stage.name, Utc::now());
        state_store
            .save(&state)
            .await
            .context("recording stage success")?;
    }

    reporter.success("all stages applied");
    Ok(())
}

/// Check the IaC engine is invocable before touching anything remote.
async fn verify_toolchain(
    runner: &impl CommandRunner,
    inputs: &DeployInputs<'_>,
) -> Result<()> {
    let env = tool_env(inputs)?;
    let out = runner
        .run(&CommandSpec {
            program: IAC_PROGRAM,
            args: &["--version"],
            env: Some(env.vars()),
            timeout: Some(TOOL_CHECK_TIMEOUT),
            ..CommandSpec::default()
        })
        .await
        .context("running terragrunt --version")?;
    ensure!(
        out.success(),
        "terragrunt is not runnable — install it or set terragrunt_bin_dir:\n{}",
        output_tail(&out.output)
    );
    Ok(())
}

/// PATH-extended environment without stage-specific overrides.
fn tool_env(inputs: &DeployInputs<'_>) -> Result<EnvironmentContext> {
    EnvironmentContext::from_base(inputs.base_env.clone())
        .extend_path(&inputs.config.tool_bin_dirs())
}

#[allow(clippy::too_many_arguments)]
async fn run_stage(
    runner: &impl CommandRunner,
    fetcher: &impl ArtifactFetcher,
    control: &(impl ParameterStore + SecretStore),
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    inputs: &DeployInputs<'_>,
    stage: &StageDescriptor,
    account_id: &str,
) -> Result<()> {
    reporter.step(&format!("fetching artifact for stage '{}'", stage.name));
    let checkout = inputs.dirs.infra_dir.join(stage.checkout_dir);
    if fs.exists(&checkout) {
        // Fresh checkout per run; a stale one would make git clone fail.
        fs.remove_dir_all(&checkout)
            .with_context(|| format!("removing stale checkout {}", checkout.display()))?;
    }
    fetcher
        .fetch(stage.source, &inputs.dirs.infra_dir)
        .await
        .with_context(|| format!("fetching {}", stage.source))?;
    ensure!(
        fs.exists(&checkout),
        "checkout {} missing after fetch",
        checkout.display()
    );
    report_progress(reporter, stage, StageProgress::ArtifactFetched);

    if stage.node_build {
        node_build(runner, &checkout, reporter).await?;
    }

    let env = stage_environment(inputs, account_id)?;
    if stage.publishes_infra_inputs {
        publish_infra_inputs(control, inputs.config, reporter).await?;
    }
    report_progress(reporter, stage, StageProgress::EnvironmentAssembled);

    let workdir = checkout.join(stage.working_subpath);
    for phase in IacPhase::ALL {
        run_iac_phase(runner, stage, phase, &workdir, env.vars(), reporter).await?;
    }
    report_progress(reporter, stage, StageProgress::Applied);
    Ok(())
}

fn report_progress(reporter: &impl ProgressReporter, stage: &StageDescriptor, to: StageProgress) {
    let note = match to {
        StageProgress::Pending => "pending",
        StageProgress::ArtifactFetched => "artifact fetched",
        StageProgress::EnvironmentAssembled => "environment assembled",
        StageProgress::Applied => "applied",
    };
    if to == StageProgress::Applied {
        reporter.success(&format!("stage '{}' {note}", stage.name));
    } else {
        reporter.step(&format!("stage '{}': {note}", stage.name));
    }
}

/// Dependency install + build on the node runtime, once each.
async fn node_build(
    runner: &impl CommandRunner,
    checkout: &Path,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("building stage package");
    let steps: [(&str, &str, &[&str]); 3] = [
        ("git submodule update", "git", &["submodule", "update", "--init"]),
        ("npm ci", "npm", &["ci"]),
        ("npm run build", "npm", &["run", "build"]),
    ];
    for (desc, program, args) in steps {
        let out = runner
            .run(&CommandSpec {
                program,
                args,
                current_dir: Some(checkout),
                ..CommandSpec::default()
            })
            .await
            .with_context(|| format!("running {desc}"))?;
        ensure!(out.success(), "{desc} failed:\n{}", output_tail(&out.output));
    }
    Ok(())
}

/// The full environment one stage's IaC run executes with.
fn stage_environment(
    inputs: &DeployInputs<'_>,
    account_id: &str,
) -> Result<EnvironmentContext> {
    let mut env = EnvironmentContext::from_base(inputs.base_env.clone())
        .extend_path(&inputs.config.tool_bin_dirs())?
        .with_credentials(inputs.credentials)
        .set("AWS_ACCOUNT_ID", account_id)
        .set("AWS_STAGE", DEPLOYMENT_STAGE)
        .set(
            "TG_PLUGIN_CACHE_DIR",
            inputs.dirs.plugin_cache_dir.display().to_string(),
        );
    if inputs.debug {
        env = env.set("TG_LOG", "debug").set("TF_LOG", "DEBUG");
    }
    Ok(env)
}

/// Publish the parameters and the secret the base infra templates read.
/// Must land before the IaC run that consumes them.
async fn publish_infra_inputs(
    control: &(impl ParameterStore + SecretStore),
    config: &InstallConfig,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("publishing infrastructure inputs");
    control.put_parameter(params::VPC_ID, &config.vpc_id).await?;
    control
        .put_parameter(params::SUBNET_1, &config.subnet_id)
        .await?;
    let locator = control
        .upsert_secret(params::AES_SECRET_NAME, &config.aes_secret)
        .await?;
    control
        .put_parameter(params::ENCRYPTION_KEY_NAME, params::AES_SECRET_NAME)
        .await?;
    control
        .put_parameter(params::SECRET_MANAGER_ARN, &locator)
        .await?;
    Ok(())
}

async fn run_iac_phase(
    runner: &impl CommandRunner,
    stage: &StageDescriptor,
    phase: IacPhase,
    workdir: &Path,
    env: &BTreeMap<String, String>,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("terragrunt {phase} for stage '{}'", stage.name));
    let mut args = vec!["run-all", phase.command(), "-input=false"];
    if phase == IacPhase::Apply {
        args.push("-auto-approve");
    }
    args.push("--terragrunt-non-interactive");
    let out = runner
        .run(&CommandSpec {
            program: IAC_PROGRAM,
            args: &args,
            current_dir: Some(workdir),
            env: Some(env),
            timeout: None,
        })
        .await
        .with_context(|| format!("invoking terragrunt {phase}"))?;
    ensure!(
        out.success(),
        "terragrunt {phase} failed for stage '{}':\n{}",
        stage.name,
        output_tail(&out.output)
    );
    Ok(())
}

/// Last lines of a command's combined output, enough to diagnose without
/// flooding the error chain.
fn output_tail(output: &str) -> String {
    const MAX_LINES: usize = 20;
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() <= MAX_LINES {
        return output.trim_end().to_owned();
    }
    lines[lines.len() - MAX_LINES..].join("\n")
}
