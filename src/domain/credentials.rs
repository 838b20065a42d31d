//! The credential set shared by every remote-facing component.

/// Resolved AWS credentials for one installer run.
///
/// Produced once at startup by a `CredentialResolver` implementation and
/// then shared read-only: the control-plane clients and every stage
/// environment are built from the same set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Present for temporary (STS) credentials, absent for long-lived keys.
    pub session_token: Option<String>,
    pub region: String,
}

impl CredentialSet {
    /// Environment variable exports for an external tool invocation.
    ///
    /// `AWS_SESSION_TOKEN` is only included when a token is present —
    /// exporting an empty token breaks the AWS CLI credential chain.
    #[must_use]
    pub fn env_exports(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("AWS_ACCESS_KEY_ID", self.access_key_id.clone()),
            ("AWS_SECRET_ACCESS_KEY", self.secret_access_key.clone()),
            ("AWS_REGION", self.region.clone()),
        ];
        if let Some(token) = self.session_token.as_deref() {
            if !token.is_empty() {
                vars.push(("AWS_SESSION_TOKEN", token.to_owned()));
            }
        }
        vars
    }
}
