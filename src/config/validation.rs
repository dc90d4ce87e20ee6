//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check path sanity (paths non-empty, no collisions)
//! - Validate value ranges (poll interval > 0, timeout > 0 when set)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ControllerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ControllerConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("engine.binary must not be empty")]
    EmptyEngineBinary,

    #[error("engine.config_path must not be empty")]
    EmptyConfigPath,

    #[error("engine.pid_path must not be empty")]
    EmptyPidPath,

    #[error("engine.template_path must not be empty")]
    EmptyTemplatePath,

    #[error("engine.config_path and engine.template_path must differ, rendering would overwrite the template")]
    TemplateCollision,

    #[error("reconfigure.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error("reconfigure.confirm_timeout_secs must be greater than zero when set")]
    ZeroConfirmTimeout,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ControllerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.engine.binary.is_empty() {
        errors.push(ValidationError::EmptyEngineBinary);
    }
    if config.engine.config_path.is_empty() {
        errors.push(ValidationError::EmptyConfigPath);
    }
    if config.engine.pid_path.is_empty() {
        errors.push(ValidationError::EmptyPidPath);
    }
    if config.engine.template_path.is_empty() {
        errors.push(ValidationError::EmptyTemplatePath);
    }
    if !config.engine.config_path.is_empty() && config.engine.config_path == config.engine.template_path {
        errors.push(ValidationError::TemplateCollision);
    }

    if config.reconfigure.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }
    if config.reconfigure.confirm_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroConfirmTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
