//! Artifact fetch via git, routed through the command runner.

use std::path::Path;

use anyhow::{Context, Result, ensure};

use crate::application::ports::{ArtifactFetcher, CommandRunner, CommandSpec};

/// Clones a stage's source repository into the infra directory.
pub struct GitFetcher<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> GitFetcher<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ArtifactFetcher for GitFetcher<R> {
    async fn fetch(&self, source: &str, into: &Path) -> Result<()> {
        let out = self
            .runner
            .run(&CommandSpec {
                program: "git",
                args: &["clone", source],
                current_dir: Some(into),
                ..CommandSpec::default()
            })
            .await
            .context("running git clone")?;
        ensure!(out.success(), "git clone {source} failed:\n{}", out.output);
        Ok(())
    }
}
