//! Process runner behind the backend gateway.
//!
//! Every `provider` verb provctl sends to the backend binary goes through
//! [`TokioCommandRunner`]: one child per call, stdin closed, both pipes
//! captured in full, bounded by the configured `command_timeout_secs`.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;

use crate::application::ports::CommandRunner;

/// Runs backend provider commands as tokio child processes.
///
/// A backend call that outlives the timeout is killed, not merely abandoned.
/// The child is owned by the collecting future and spawned with
/// `kill_on_drop`, so losing the `select!` race terminates the process.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Wait for exit while draining both pipes, so a chatty backend cannot
    /// block on a full pipe buffer.
    async fn collect(mut child: Child, program: &str) -> Result<Output> {
        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();
        let (status, stdout, stderr) =
            tokio::join!(child.wait(), drain(stdout.as_mut()), drain(stderr.as_mut()));
        let status = status.with_context(|| format!("waiting for backend {program}"))?;
        Ok(Output { status, stdout, stderr })
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<&mut R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(pipe) = pipe {
        // A read error truncates output; the exit status still decides the outcome.
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        tracing::trace!(program, ?args, "spawning backend command");
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;
        let pid = child.id();

        tokio::select! {
            output = Self::collect(child, program) => output,
            () = tokio::time::sleep(self.timeout) => {
                tracing::warn!(program, ?pid, timeout_secs = self.timeout.as_secs(), "backend command timed out");
                anyhow::bail!(
                    "backend {program} timed out after {}s (raise command_timeout_secs if this provider is slow)",
                    self.timeout.as_secs()
                )
            }
        }
    }
}
