//! `tvo-installer deploy` — infrastructure stages only.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ControlPlane;
use crate::application::services::deploy::{self, DeployInputs};
use crate::domain::config::InstallConfig;
use crate::domain::credentials::CredentialSet;
use crate::infra::aws::AwsControlPlane;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fetch::GitFetcher;
use crate::infra::fs::LocalFs;
use crate::infra::paths::InstallerPaths;
use crate::infra::state::StateManager;

/// Run `tvo-installer deploy`.
///
/// # Errors
///
/// Returns an error naming the failing stage and step.
pub async fn run(app: &AppContext) -> Result<()> {
    let config = app.load_config()?;
    let credentials = app.resolve_credentials(&config)?;
    let control = AwsControlPlane::connect(&credentials).await;
    let paths = InstallerPaths::new()?;

    app.output.header("Deploying infrastructure stages");
    deploy_all_stages(app, &control, &paths, &config, &credentials).await
}

/// Wire the production adapters into the deploy service. Shared with the
/// install command.
pub(crate) async fn deploy_all_stages(
    app: &AppContext,
    control: &impl ControlPlane,
    paths: &InstallerPaths,
    config: &InstallConfig,
    credentials: &CredentialSet,
) -> Result<()> {
    let work_dirs = paths.work_dirs();
    let inputs = DeployInputs {
        credentials,
        config,
        dirs: &work_dirs,
        base_env: std::env::vars().collect(),
        debug: app.debug,
    };
    let runner = TokioCommandRunner;
    let fetcher = GitFetcher::new(TokioCommandRunner);
    let state_store = StateManager::new(paths.state_file());
    let reporter = app.terminal_reporter();
    deploy::deploy_stages(
        &runner,
        &fetcher,
        control,
        &LocalFs,
        &state_store,
        &reporter,
        &inputs,
    )
    .await
}
