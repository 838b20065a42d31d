//! `tvo-installer configure` — application registration against an
//! already-deployed platform.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::configure;
use crate::commands::install::print_summary;
use crate::infra::aws::AwsControlPlane;
use crate::infra::crypto::AesEcbSealer;

/// Run `tvo-installer configure`.
///
/// # Errors
///
/// Fails on the first parameter read or record write that fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let config = app.load_config()?;
    let credentials = app.resolve_credentials(&config)?;
    let control = AwsControlPlane::connect(&credentials).await;
    let reporter = app.terminal_reporter();

    app.output.header("Registering application");
    let sealer = AesEcbSealer::new(&config.aes_secret)?;
    let outcome = configure::register_application(&control, &sealer, &reporter, &config).await?;

    print_summary(&app.output, &outcome);
    Ok(())
}
