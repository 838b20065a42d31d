//! Install run state.
//!
//! Records which stages have applied successfully so an interrupted run
//! leaves a readable trail. Re-runs do not skip applied stages — applies
//! are idempotent and re-running converges — the state exists so the
//! operator can see how far the last run got.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successfully applied stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedStage {
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// Persisted install state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallState {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub stages: Vec<AppliedStage>,
}

impl InstallState {
    #[must_use]
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            stages: Vec::new(),
        }
    }

    /// Record a stage success, replacing any earlier entry for the same
    /// stage (re-runs overwrite, they do not duplicate).
    pub fn record(&mut self, name: &str, applied_at: DateTime<Utc>) {
        self.stages.retain(|s| s.name != name);
        self.stages.push(AppliedStage {
            name: name.to_owned(),
            applied_at,
        });
    }

    #[must_use]
    pub fn is_applied(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s.name == name)
    }
}
