//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Provisions the Tvo security scan platform on AWS
#[derive(Parser)]
#[command(
    name = "tvo-installer",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to a JSON install config (prompts interactively when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose IaC engine logging (TG_LOG / TF_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Skip interactive prompts (requires --config)
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy all stages, register the application, print the summary
    Install(commands::install::InstallArgs),

    /// Deploy the infrastructure stages only
    Deploy,

    /// Register application records against an existing deployment
    Configure,

    /// Submit the post-install validation job and wait for it
    Validate,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` converts it into the exit code.
    pub async fn run(self) -> Result<()> {
        let Cli { config, debug, quiet, no_color, yes, command } = self;
        let app = AppContext::new(AppFlags {
            no_color,
            quiet,
            yes,
            debug,
            config,
        });
        match command {
            Command::Install(args) => commands::install::run(&args, &app).await,
            Command::Deploy => commands::deploy::run(&app).await,
            Command::Configure => commands::configure::run(&app).await,
            Command::Validate => commands::validate::run(&app).await,
            Command::Version => commands::version::run(),
        }
    }
}
