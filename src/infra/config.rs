//! Install config loading and interactive collection.

use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};

use crate::domain::config::InstallConfig;

/// Load and validate a JSON config file.
///
/// # Errors
///
/// Returns an error when the file is unreadable, not valid JSON, or
/// fails validation.
pub fn load(path: &Path) -> Result<InstallConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: InstallConfig = serde_json::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Load the config file when given, otherwise prompt interactively.
///
/// # Errors
///
/// In non-interactive mode a config file is mandatory.
pub fn load_or_prompt(path: Option<&Path>, non_interactive: bool) -> Result<InstallConfig> {
    match path {
        Some(p) => load(p),
        None if non_interactive => {
            anyhow::bail!("a config file is required in non-interactive mode; pass --config <file>")
        }
        None => prompt(),
    }
}

/// Collect the full install config from the terminal.
///
/// # Errors
///
/// Returns an error if a prompt fails (no TTY) or validation fails.
pub fn prompt() -> Result<InstallConfig> {
    let mut config = InstallConfig {
        aws_region: text("AWS region")?,
        ..InstallConfig::default()
    };

    let source = Select::new()
        .with_prompt("Credential source")
        .items(&[
            "Enter keys directly",
            "Use a profile from ~/.aws/credentials",
        ])
        .default(0)
        .interact()?;
    if source == 0 {
        config.aws_access_key_id = secret("AWS access key id")?;
        config.aws_secret_access_key = secret("AWS secret access key")?;
        config.aws_session_token = Password::new()
            .with_prompt("AWS session token (empty for long-lived keys)")
            .allow_empty_password(true)
            .interact()?
            .trim()
            .to_owned();
    } else {
        config.aws_profile = text("AWS profile")?;
    }

    config.vpc_id = text("VPC id")?;
    config.subnet_id = text("Subnet id (a private subnet with internet access is recommended)")?;
    config.aes_secret = secret("AES secret (exactly 32 characters)")?;
    config.user_name = text("First platform user name")?;
    config.open_ai_model = text("OpenAI model")?;
    config.open_ai_api_key = secret("OpenAI API key")?;

    config.validate()?;
    Ok(config)
}

fn text(prompt: &str) -> Result<String> {
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value.trim().to_owned())
}

fn secret(prompt: &str) -> Result<String> {
    let value = Password::new().with_prompt(prompt).interact()?;
    Ok(value.trim().to_owned())
}
