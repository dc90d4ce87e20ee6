//! Engine orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! ServiceSpec
//!     → service::validation (completeness gate)
//!     → render.rs (candidate configuration on disk)
//!     → runner.rs, check mode (engine -c -f <candidate>)
//!     → pid marker snapshot (raw bytes)
//!     → runner.rs, reload mode (engine ... -sf <old pid>)
//!     → confirm.rs (pid marker byte change)
//! ```
//!
//! # Design Decisions
//! - The live instance is never touched until the candidate passes check mode
//! - Reload success is confirmed by a pid change, not by exit status
//! - Process execution and file reads sit behind capability traits so tests
//!   substitute fakes without shared global state

pub mod confirm;
pub mod orchestrator;
pub mod render;
pub mod runner;

pub use confirm::{FileReader, FsReader, ReloadConfirmer};
pub use orchestrator::{Orchestrator, ReconfigureError, ReconfigureReport};
pub use render::{ConfigRenderer, TemplateRenderer};
pub use runner::{CommandRunner, Engine, EngineError, EngineRun, ProcessOutcome, ProcessRunner};
