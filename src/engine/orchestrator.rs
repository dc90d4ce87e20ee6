//! Reconfiguration orchestration.
//!
//! # Responsibilities
//! - Drive one reconfiguration: validate → render → check → reload → confirm
//! - Short-circuit on the first failure with a classified error
//! - Serialize reconfigurations against the single live engine instance
//!
//! # Design Decisions
//! - The pid snapshot is taken strictly before the reload is issued; the
//!   other order races the engine rewriting the marker
//! - The reload's exit status is not trusted as completion: only the pid
//!   marker change is
//! - The confirmation deadline is caller-supplied configuration, `None`
//!   meaning wait indefinitely

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time;

use crate::config::schema::ControllerConfig;
use crate::engine::confirm::{FileReader, ReloadConfirmer};
use crate::engine::render::ConfigRenderer;
use crate::engine::runner::{Engine, EngineError, ProcessRunner};
use crate::service::spec::ServiceSpec;
use crate::service::validation::{validate, ValidationError};

/// Why a reconfiguration did not complete.
#[derive(Debug, Error)]
pub enum ReconfigureError {
    /// The service definition was rejected; the engine was never touched.
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// Rendering the candidate configuration failed; the engine was never
    /// touched.
    #[error("failed to render candidate configuration: {0}")]
    Render(#[source] std::io::Error),

    /// The candidate configuration failed the engine's check mode; the live
    /// instance keeps serving its current configuration.
    #[error("configuration check failed: {0}")]
    ConfigCheck(#[source] EngineError),

    /// The reload command itself failed; the live instance's state is
    /// uncertain and must be treated as unconfirmed.
    #[error("reload command failed: {0}")]
    Reload(#[source] EngineError),

    /// The reload command succeeded but the pid marker did not change within
    /// the configured deadline.
    #[error("reload issued but not confirmed within {0:?}")]
    ConfirmTimeout(Duration),
}

/// What a completed reconfiguration reports back.
#[derive(Debug, Default)]
pub struct ReconfigureReport {
    /// Soft warning from the configuration check, when the engine wrote
    /// advisories to stderr.
    pub check_warning: Option<String>,
}

/// Composes validation, rendering, engine invocations, and reload
/// confirmation into one sequential flow.
pub struct Orchestrator<R, F, C> {
    engine: Engine<R>,
    reader: F,
    confirmer: ReloadConfirmer<F>,
    renderer: C,
    config_path: PathBuf,
    pid_path: PathBuf,
    confirm_timeout: Option<Duration>,
    // One reconfiguration in flight against the live instance at a time; the
    // pid comparison assumes no overlapping reload.
    reconfigure_lock: Mutex<()>,
}

impl<R, F, C> Orchestrator<R, F, C>
where
    R: ProcessRunner,
    F: FileReader + Clone,
    C: ConfigRenderer,
{
    pub fn new(runner: R, reader: F, renderer: C, config: &ControllerConfig) -> Self {
        let poll_interval = Duration::from_millis(config.reconfigure.poll_interval_ms);
        Self {
            engine: Engine::new(runner),
            confirmer: ReloadConfirmer::with_poll_interval(reader.clone(), poll_interval),
            reader,
            renderer,
            config_path: PathBuf::from(&config.engine.config_path),
            pid_path: PathBuf::from(&config.engine.pid_path),
            confirm_timeout: config.reconfigure.confirm_timeout_secs.map(Duration::from_secs),
            reconfigure_lock: Mutex::new(()),
        }
    }

    /// Run one full reconfiguration for `spec`.
    pub async fn reconfigure(&self, spec: &ServiceSpec) -> Result<ReconfigureReport, ReconfigureError> {
        let _guard = self.reconfigure_lock.lock().await;

        validate(spec)?;
        tracing::info!(service = %spec.service_name, "Service definition accepted");

        let candidate = self.renderer.render(spec).map_err(ReconfigureError::Render)?;

        let check = self
            .engine
            .execute(&check_args(&candidate))
            .await
            .map_err(ReconfigureError::ConfigCheck)?;
        tracing::info!(path = %candidate.display(), "Candidate configuration passed check");

        self.reload_and_confirm().await?;

        tracing::info!(service = %spec.service_name, "Reconfiguration complete");
        Ok(ReconfigureReport {
            check_warning: check.warning,
        })
    }

    /// Check the current configuration without touching the live instance.
    pub async fn check_current(&self) -> Result<crate::engine::runner::EngineRun, EngineError> {
        self.engine.execute(&check_args(&self.config_path)).await
    }

    /// Reload against the current configuration and confirm, skipping
    /// validation and rendering (watch mode, operator-initiated reloads).
    pub async fn reload_current(&self) -> Result<(), ReconfigureError> {
        let _guard = self.reconfigure_lock.lock().await;
        self.reload_and_confirm().await
    }

    async fn reload_and_confirm(&self) -> Result<(), ReconfigureError> {
        // Snapshot strictly before issuing the reload. A missing marker
        // (first start) snapshots as empty, so any written pid confirms.
        let previous = self.reader.read(&self.pid_path).unwrap_or_default();

        self.engine
            .execute(&reload_args(&self.config_path, &self.pid_path, &previous))
            .await
            .map_err(ReconfigureError::Reload)?;
        tracing::info!("Reload issued, waiting for pid marker to change");

        match self.confirm_timeout {
            Some(deadline) => time::timeout(
                deadline,
                self.confirmer.wait_for_reload(&previous, &self.pid_path),
            )
            .await
            .map_err(|_| ReconfigureError::ConfirmTimeout(deadline)),
            None => {
                self.confirmer.wait_for_reload(&previous, &self.pid_path).await;
                Ok(())
            }
        }
    }
}

/// Arguments for a check-mode invocation.
fn check_args(config_path: &std::path::Path) -> Vec<String> {
    vec![
        "-c".to_string(),
        "-f".to_string(),
        config_path.display().to_string(),
    ]
}

/// Arguments for a reload-mode invocation.
///
/// The previous pid is passed through as text for the engine's finish-old-
/// workers flag; it is never parsed by the controller.
fn reload_args(
    config_path: &std::path::Path,
    pid_path: &std::path::Path,
    previous_pid: &[u8],
) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        config_path.display().to_string(),
        "-p".to_string(),
        pid_path.display().to_string(),
        "-D".to_string(),
    ];
    let previous = String::from_utf8_lossy(previous_pid);
    let previous = previous.trim();
    if !previous.is_empty() {
        args.push("-sf".to_string());
        args.push(previous.to_string());
    }
    args
}
