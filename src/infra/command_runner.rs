//! Production `CommandRunner` — tokio process execution with optional
//! timeout and guaranteed kill.
//!
//! On Windows, `tokio::time::timeout` around `.output().await` does NOT
//! kill the child when the timeout fires — the future is dropped but the
//! OS process keeps running. This implementation uses `tokio::select!`
//! with explicit `child.kill()` to guarantee termination.

use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStderr, ChildStdout};

use crate::application::ports::{CommandOutput, CommandRunner, CommandSpec};

/// Production runner. Stateless; construct freely.
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, spec: &CommandSpec<'_>) -> Result<CommandOutput> {
        let mut cmd = tokio::process::Command::new(spec.program);
        cmd.args(spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = spec.current_dir {
            cmd.current_dir(dir);
        }
        if let Some(env) = spec.env {
            // An explicit env is the complete environment, not a delta.
            cmd.env_clear();
            cmd.envs(env);
        }
        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn {}", spec.program))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (status, stdout, stderr) = match spec.timeout {
            None => wait_with_output(&mut child, stdout, stderr, spec.program).await?,
            Some(timeout) => tokio::select! {
                result = wait_with_output(&mut child, stdout, stderr, spec.program) => result?,
                () = tokio::time::sleep(timeout) => {
                    let _ = child.kill().await;
                    anyhow::bail!("{} timed out after {}s", spec.program, timeout.as_secs());
                }
            },
        };

        let mut output = String::from_utf8_lossy(&stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&stderr));
        Ok(CommandOutput { status, output })
    }
}

/// Read stdout/stderr CONCURRENTLY with wait() to avoid pipe deadlock.
/// If the child writes more than the OS pipe buffer (64KB Linux, 4KB
/// some Windows configs), it blocks on write; waiting before reading
/// would never resolve.
async fn wait_with_output(
    child: &mut Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    program: &str,
) -> Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let (status, stdout, stderr) = tokio::join!(child.wait(), drain(stdout), drain(stderr));
    Ok((
        status.with_context(|| format!("waiting for {program}"))?,
        stdout,
        stderr,
    ))
}

async fn drain<R: tokio::io::AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut reader) = handle {
        let _ = reader.read_to_end(&mut buf).await;
    }
    buf
}
