//! Proxy engine process execution.
//!
//! # Responsibilities
//! - Spawn the engine binary for check-mode and reload-mode invocations
//! - Tee stdout/stderr to the operator streams while capturing them
//! - Classify the outcome: failure, success with warning, clean success
//!
//! # Design Decisions
//! - Output is duplicated, not redirected: operators keep seeing live engine
//!   output while the controller inspects the captured text
//! - A clean exit with stderr output is a soft warning, never a failure; the
//!   engine uses stderr for advisories that don't fail its own config check
//! - Exit status is reduced to a portable signed code; signal-terminated
//!   processes report -1

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

/// Result of one engine invocation.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Portable exit code; 0 means success, -1 means killed by signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Combined output in the fixed layout used by every diagnostic surface.
    pub fn combined_diagnostic(&self) -> String {
        format!("\nstdout:\n{}\nstderr:\n{}\n", self.stdout, self.stderr)
    }
}

/// Capability to execute the engine binary.
pub trait ProcessRunner: Send + Sync {
    /// Spawn the engine with `args`, stream its output, and wait for exit.
    fn run(&self, args: &[String]) -> impl Future<Output = io::Result<ProcessOutcome>> + Send;
}

/// Real runner: spawns the configured binary via tokio.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    binary: PathBuf,
}

impl CommandRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl ProcessRunner for CommandRunner {
    async fn run(&self, args: &[String]) -> io::Result<ProcessOutcome> {
        let mut child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take().expect("stdout was piped");
        let stderr = child.stderr.take().expect("stderr was piped");

        // Both streams drain concurrently; a full pipe on either side would
        // otherwise deadlock the child against wait().
        let out_task = tokio::spawn(tee(stdout, tokio::io::stdout()));
        let err_task = tokio::spawn(tee(stderr, tokio::io::stderr()));

        let status = child.wait().await?;

        let stdout_buf = out_task.await.unwrap_or_default();
        let stderr_buf = err_task.await.unwrap_or_default();

        Ok(ProcessOutcome {
            exit_code: status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
        })
    }
}

/// Copy `from` into the capture buffer, mirroring each chunk to `to`.
/// The operator copy is best-effort; capture stops at EOF or read error.
async fn tee<R, W>(mut from: R, mut to: W) -> Vec<u8>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut captured = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match from.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                captured.extend_from_slice(&buf[..n]);
                let _ = to.write_all(&buf[..n]).await;
            }
        }
    }
    captured
}

/// Errors from a classified engine invocation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to launch proxy engine: {0}")]
    Spawn(#[source] io::Error),

    #[error("proxy engine exited with status {exit_code}:{diagnostic}")]
    Failed { exit_code: i32, diagnostic: String },
}

/// Outcome of a successful classified invocation.
#[derive(Debug, Default)]
pub struct EngineRun {
    /// Soft warning: the invocation succeeded but wrote to stderr.
    pub warning: Option<String>,
}

/// Classifies engine invocations on top of a [`ProcessRunner`].
#[derive(Debug, Clone)]
pub struct Engine<R> {
    runner: R,
}

impl<R: ProcessRunner> Engine<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run the engine with `args` and classify the result.
    pub async fn execute(&self, args: &[String]) -> Result<EngineRun, EngineError> {
        tracing::debug!(args = ?args, "Invoking proxy engine");

        let outcome = self.runner.run(args).await.map_err(EngineError::Spawn)?;
        let diagnostic = outcome.combined_diagnostic();

        if !outcome.success() {
            tracing::error!(exit_code = outcome.exit_code, "Proxy engine invocation failed");
            return Err(EngineError::Failed {
                exit_code: outcome.exit_code,
                diagnostic,
            });
        }

        if outcome.stderr.is_empty() {
            return Ok(EngineRun::default());
        }

        let warning = format!(
            "The configuration file is valid, but there still may be a misconfiguration \
             somewhere that will give unexpected results, please verify: {}",
            diagnostic
        );
        tracing::warn!("{}", warning);
        Ok(EngineRun {
            warning: Some(warning),
        })
    }
}
