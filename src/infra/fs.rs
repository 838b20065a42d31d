//! Local filesystem adapter.

use std::path::Path;

use anyhow::{Context, Result};

/// Production implementation of the `LocalFs` port using `std::fs`.
pub struct LocalFs;

impl crate::application::ports::LocalFs for LocalFs {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
