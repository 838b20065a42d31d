//! STS identity adapter.

use anyhow::{Context, Result};

use super::AwsControlPlane;
use crate::application::ports::IdentityService;

impl IdentityService for AwsControlPlane {
    async fn account_id(&self) -> Result<String> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .context("calling sts get-caller-identity")?;
        output
            .account()
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("caller identity response has no account id"))
    }
}
