//! `tvo-installer install` — the full provisioning run.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::configure::{self, ConfigureOutcome};
use crate::application::services::validate;
use crate::commands::deploy::deploy_all_stages;
use crate::infra::aws::AwsControlPlane;
use crate::infra::crypto::AesEcbSealer;
use crate::infra::paths::InstallerPaths;
use crate::output::OutputContext;

/// Arguments for the install command.
#[derive(Args, Default)]
pub struct InstallArgs {
    /// Also run the post-install validation job
    #[arg(long)]
    pub validate: bool,
}

/// Run `tvo-installer install`.
///
/// # Errors
///
/// Returns an error naming the failing stage or step; the process exits
/// non-zero without rollback (re-running converges).
pub async fn run(args: &InstallArgs, app: &AppContext) -> Result<()> {
    let config = app.load_config()?;
    let credentials = app.resolve_credentials(&config)?;
    let control = AwsControlPlane::connect(&credentials).await;
    let paths = InstallerPaths::new()?;
    let reporter = app.terminal_reporter();

    app.output.header("Deploying infrastructure stages");
    deploy_all_stages(app, &control, &paths, &config, &credentials).await?;

    app.output.header("Registering application");
    let sealer = AesEcbSealer::new(&config.aes_secret)?;
    let outcome = configure::register_application(&control, &sealer, &reporter, &config).await?;

    if args.validate {
        app.output.header("Running validation job");
        validate::run_validation_job(&control, &app.cancel, &reporter).await?;
    }

    print_summary(&app.output, &outcome);
    Ok(())
}

/// Final summary block — the one place the plaintext API key is shown.
pub(crate) fn print_summary(ctx: &OutputContext, outcome: &ConfigureOutcome) {
    ctx.header("Installation complete");
    ctx.kv("Setup endpoint", &outcome.setup_endpoint);
    ctx.kv("User ID", &outcome.user_id);
    ctx.kv("API key", &outcome.api_key);
    ctx.info("Keep the user id and API key safe — only a hash of the key is stored.");
    ctx.info("Next: download the Tvo CLI and run 'tli setup'.");
}
