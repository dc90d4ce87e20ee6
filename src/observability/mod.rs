//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; every orchestration step carries fields
//! - Log level comes from RUST_LOG when set, config otherwise

pub mod logging;
