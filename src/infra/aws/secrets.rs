//! Secrets Manager adapter.

use anyhow::{Context, Result};

use super::AwsControlPlane;
use crate::application::ports::SecretStore;

impl SecretStore for AwsControlPlane {
    /// Check-then-act upsert. Not transactional: concurrent runs against
    /// the same secret name must be serialized by the caller.
    async fn upsert_secret(&self, name: &str, value: &str) -> Result<String> {
        match self
            .secrets
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
        {
            Ok(_) => {
                let output = self
                    .secrets
                    .update_secret()
                    .secret_id(name)
                    .secret_string(value)
                    .send()
                    .await
                    .with_context(|| format!("updating secret '{name}'"))?;
                output
                    .arn()
                    .map(str::to_owned)
                    .ok_or_else(|| anyhow::anyhow!("secret '{name}' update returned no ARN"))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if !service_err.is_resource_not_found_exception() {
                    return Err(anyhow::Error::new(service_err)
                        .context(format!("checking secret '{name}'")));
                }
                let output = self
                    .secrets
                    .create_secret()
                    .name(name)
                    .secret_string(value)
                    .description(format!("Secret created for {name}"))
                    .send()
                    .await
                    .with_context(|| format!("creating secret '{name}'"))?;
                output
                    .arn()
                    .map(str::to_owned)
                    .ok_or_else(|| anyhow::anyhow!("secret '{name}' create returned no ARN"))
            }
        }
    }
}
