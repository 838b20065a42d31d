//! SSM Parameter Store adapter.

use anyhow::{Context, Result};
use aws_sdk_ssm::types::{ParameterTier, ParameterType};

use super::AwsControlPlane;
use crate::application::ports::ParameterStore;
use crate::domain::error::StoreError;

impl ParameterStore for AwsControlPlane {
    async fn put_parameter(&self, path: &str, value: &str) -> Result<()> {
        self.ssm
            .put_parameter()
            .name(path)
            .value(value)
            .r#type(ParameterType::String)
            .tier(ParameterTier::Standard)
            .overwrite(true)
            .send()
            .await
            .with_context(|| format!("writing parameter '{path}'"))?;
        Ok(())
    }

    async fn get_parameter(&self, path: &str) -> Result<String> {
        let output = match self
            .ssm
            .get_parameter()
            .name(path)
            .with_decryption(true)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_parameter_not_found() {
                    return Err(StoreError::ParameterNotFound {
                        path: path.to_owned(),
                    }
                    .into());
                }
                return Err(anyhow::Error::new(service_err)
                    .context(format!("reading parameter '{path}'")));
            }
        };
        let value = output
            .parameter()
            .and_then(|p| p.value())
            .unwrap_or_default();
        if value.is_empty() {
            return Err(StoreError::ParameterNotFound {
                path: path.to_owned(),
            }
            .into());
        }
        Ok(value.to_owned())
    }
}
