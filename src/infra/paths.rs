//! Local installer directories.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::WorkDirs;

/// Everything lives under `~/.tvo` (override with `TVO_HOME`).
pub struct InstallerPaths {
    root: PathBuf,
}

impl InstallerPaths {
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        if let Ok(val) = std::env::var("TVO_HOME") {
            return Ok(Self {
                root: PathBuf::from(val),
            });
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self {
            root: home.join(".tvo"),
        })
    }

    /// Paths rooted at an explicit directory (used in tests).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where stage artifacts are checked out.
    #[must_use]
    pub fn infra_dir(&self) -> PathBuf {
        self.root.join("infra")
    }

    /// Terraform provider plugin cache shared across stages.
    #[must_use]
    pub fn plugin_cache_dir(&self) -> PathBuf {
        self.root.join("terraform-plugins")
    }

    /// Install state file.
    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    #[must_use]
    pub fn work_dirs(&self) -> WorkDirs {
        WorkDirs {
            infra_dir: self.infra_dir(),
            plugin_cache_dir: self.plugin_cache_dir(),
        }
    }
}
