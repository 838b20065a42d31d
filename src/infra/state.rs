//! Infrastructure implementation of the `InstallStateStore` port.
//!
//! Async load/save via `tokio::task::spawn_blocking` with atomic write
//! (temp file + rename) to prevent state corruption.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::InstallStateStore;
use crate::domain::state::InstallState;

/// State file manager.
pub struct StateManager {
    path: PathBuf,
}

impl StateManager {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_sync(&self) -> Result<Option<InstallState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading state file {}", self.path.display()))?;
        let state: InstallState = serde_json::from_str(&content)
            .with_context(|| format!("parsing state file {}", self.path.display()))?;
        Ok(Some(state))
    }

    fn save_sync(&self, state: &InstallState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(state).context("serializing state")?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing state file {}", self.path.display()))?;
        Ok(())
    }
}

impl InstallStateStore for StateManager {
    async fn load(&self) -> Result<Option<InstallState>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || StateManager::new(path).load_sync())
            .await
            .context("state load task panicked")?
    }

    async fn save(&self, state: &InstallState) -> Result<()> {
        let path = self.path.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || StateManager::new(path).save_sync(&state))
            .await
            .context("state save task panicked")?
    }
}
