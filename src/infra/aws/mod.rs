//! AWS control-plane adapters.
//!
//! One `AwsControlPlane` implements every control-plane port from a
//! single shared SDK config built once from the resolved credential set.
//! No adapter retries: every remote call is attempted exactly once and
//! its failure propagates, wrapped with the implicated path/name/table.

mod batch;
mod identity;
mod params;
mod records;
mod secrets;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;

use crate::domain::credentials::CredentialSet;

/// Client bundle for the remote control plane.
pub struct AwsControlPlane {
    ssm: aws_sdk_ssm::Client,
    secrets: aws_sdk_secretsmanager::Client,
    dynamo: aws_sdk_dynamodb::Client,
    batch: aws_sdk_batch::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsControlPlane {
    /// Build all clients from one credential set.
    pub async fn connect(creds: &CredentialSet) -> Self {
        let provider = Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            creds.session_token.clone(),
            None,
            "tvo-installer",
        );
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(creds.region.clone()))
            .credentials_provider(provider)
            .load()
            .await;
        Self {
            ssm: aws_sdk_ssm::Client::new(&config),
            secrets: aws_sdk_secretsmanager::Client::new(&config),
            dynamo: aws_sdk_dynamodb::Client::new(&config),
            batch: aws_sdk_batch::Client::new(&config),
            sts: aws_sdk_sts::Client::new(&config),
        }
    }
}
