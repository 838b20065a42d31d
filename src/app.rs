//! Application context — unified state passed to every command handler.
//!
//! Constructed once in `Cli::run()` so adding a cross-cutting concern
//! requires one field change here, not a signature change per command.

use std::path::PathBuf;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::application::ports::CredentialResolver as _;
use crate::domain::config::{CredentialSource, InstallConfig};
use crate::domain::credentials::CredentialSet;
use crate::infra::credentials::{SharedCredentialsFile, StaticCredentials};
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Skip interactive prompts (also set by `CI` / `TVO_YES` env vars).
    pub yes: bool,
    /// Verbose IaC engine logging.
    pub debug: bool,
    /// Optional install config file.
    pub config: Option<PathBuf>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// When `true`, never prompt; a config file is required.
    pub non_interactive: bool,
    /// Verbose IaC engine logging requested.
    pub debug: bool,
    /// Path to the install config file, when given.
    pub config_path: Option<PathBuf>,
    /// Run-scoped cancellation token, fired on Ctrl-C.
    pub cancel: CancellationToken,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// Must be called inside the tokio runtime: it spawns the Ctrl-C
    /// watcher that fires the run's cancellation token.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("TVO_YES").is_ok();
        let cancel = CancellationToken::new();
        let signal_token = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal_token.cancel();
            }
        });

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            non_interactive: flags.yes || ci_env,
            debug: flags.debug,
            config_path: flags.config,
            cancel,
        }
    }

    /// Progress reporter bound to this context's output settings.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Load the install config from `--config`, or prompt for it.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is invalid or prompting is not
    /// possible in non-interactive mode.
    pub fn load_config(&self) -> Result<InstallConfig> {
        crate::infra::config::load_or_prompt(self.config_path.as_deref(), self.non_interactive)
    }

    /// Resolve the run's credential set from the configured source.
    ///
    /// # Errors
    ///
    /// Propagates `CredentialError` from the selected resolver.
    pub fn resolve_credentials(&self, config: &InstallConfig) -> Result<CredentialSet> {
        match config.credential_source()? {
            CredentialSource::DirectInput(set) => StaticCredentials::new(set).resolve(),
            CredentialSource::ProfileLookup { profile, region } => {
                SharedCredentialsFile::new(profile, region)?.resolve()
            }
        }
    }
}
