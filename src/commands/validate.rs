//! `tvo-installer validate` — submit the validation job and wait.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::validate;
use crate::infra::aws::AwsControlPlane;
use crate::output::reporter::SpinnerReporter;

/// Run `tvo-installer validate`.
///
/// # Errors
///
/// Propagates the terminal job error, including cancellation on Ctrl-C.
pub async fn run(app: &AppContext) -> Result<()> {
    let config = app.load_config()?;
    let credentials = app.resolve_credentials(&config)?;
    let control = AwsControlPlane::connect(&credentials).await;

    if app.output.show_progress() {
        let reporter = SpinnerReporter::new("submitting validation job...");
        let result = validate::run_validation_job(&control, &app.cancel, &reporter).await;
        match &result {
            Ok(()) => reporter.finish("validation job succeeded"),
            Err(_) => reporter.clear(),
        }
        result
    } else {
        let reporter = app.terminal_reporter();
        validate::run_validation_job(&control, &app.cancel, &reporter).await
    }
}
