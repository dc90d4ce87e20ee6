//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! controller config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ControllerConfig (validated, immutable)
//!
//! At render time:
//!     resolver.rs pulls ad-hoc values
//!     (secret file → env var → default)
//!
//! In watch mode:
//!     watcher.rs detects engine config change
//!     → change event on a channel
//!     → caller re-checks and reloads the engine
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require restarting the controller
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod resolver;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use resolver::Resolver;
pub use schema::ControllerConfig;
pub use schema::EngineConfig;
pub use schema::ReconfigureConfig;
