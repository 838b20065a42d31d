//! Remote configuration store paths.
//!
//! These hierarchical keys are a deployment contract with the
//! infrastructure templates, which read the store directly during apply.
//! They must be preserved verbatim.

/// Written before the first stage so the base infra templates can read them.
pub const VPC_ID: &str = "/tvo/security-scan/prod/infra/vpc-id";
pub const SUBNET_1: &str = "/tvo/security-scan/prod/infra/subnet1";
pub const ENCRYPTION_KEY_NAME: &str = "/tvo/security-scan/prod/infra/encryption-key-name";
pub const SECRET_MANAGER_ARN: &str = "/tvo/security-scan/prod/infra/secret-manager-arn";

/// Name of the secret holding the AES key.
pub const AES_SECRET_NAME: &str = "/tvo/security-scan/prod/aes_secret";

/// Published by the deployed infrastructure, read during registration.
pub const DYNAMO_USER_TABLE: &str = "/tvo/security-scan/prod/infra/dynamo-user-table-name";
pub const DYNAMO_API_KEY_TABLE: &str = "/tvo/security-scan/prod/infra/dynamo-api-key-table-name";
pub const DYNAMO_CONFIGURATION_TABLE: &str =
    "/tvo/security-scan/prod/infra/dynamo-configuration-table-name";
pub const CLI_FILES_BUCKET: &str = "/tvo/security-scan/prod/infra/cli-files-bucket-name";
pub const SCAN_JOB_QUEUE: &str = "/tvo/security-scan/prod/infra/security-scan-job-queue-name";
pub const SCAN_JOB_DEFINITION: &str = "/tvo/security-scan/prod/infra/security-scan-batch-name";
pub const REPORT_BUCKET: &str = "/tvo/security-scan/prod/infra/report-bucket-name";
pub const REPORT_BUCKET_DOMAIN: &str =
    "/tvo/security-scan/prod/infra/report-bucket-website-domain";
pub const TASK_API_ENDPOINT: &str =
    "/tvo/security-scan/prod/infra/api-gateway-task-api-full-endpoint";
pub const ACCOUNT_API_ENDPOINT: &str =
    "/tvo/security-scan/prod/infra/api-gateway-account-api-full-endpoint";
