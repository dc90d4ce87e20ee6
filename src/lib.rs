//! Control process for an HAProxy-style reverse proxy engine.

pub mod config;
pub mod engine;
pub mod observability;
pub mod routing;
pub mod service;

pub use config::schema::ControllerConfig;
pub use engine::orchestrator::{Orchestrator, ReconfigureError};
pub use service::spec::{ServiceDestination, ServiceSpec};
