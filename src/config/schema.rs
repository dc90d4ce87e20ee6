//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! controller. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Root configuration for the controller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    /// Proxy engine invocation settings (binary, config, pid file).
    pub engine: EngineConfig,

    /// Reconfiguration orchestration settings.
    pub reconfigure: ReconfigureConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Proxy engine invocation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine binary to invoke for config checks and reloads.
    pub binary: String,

    /// Rendered configuration file the engine runs with.
    pub config_path: String,

    /// Pid file written by the engine on each successful start.
    pub pid_path: String,

    /// Configuration template skeleton used when rendering.
    pub template_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: "haproxy".to_string(),
            config_path: "/cfg/haproxy.cfg".to_string(),
            pid_path: "/var/run/haproxy.pid".to_string(),
            template_path: "/cfg/tmpl/haproxy.tmpl".to_string(),
        }
    }
}

/// Reconfiguration orchestration settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconfigureConfig {
    /// Pid marker poll interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Deadline for reload confirmation in seconds.
    /// `None` polls until the pid marker changes, however long that takes.
    pub confirm_timeout_secs: Option<u64>,
}

impl Default for ReconfigureConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            confirm_timeout_secs: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.engine.binary, "haproxy");
        assert_eq!(config.reconfigure.poll_interval_ms, 500);
        assert_eq!(config.reconfigure.confirm_timeout_secs, None);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_minimal_toml() {
        let config: ControllerConfig = toml::from_str(
            r#"
            [engine]
            binary = "/usr/sbin/haproxy"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.binary, "/usr/sbin/haproxy");
        // Unset sections keep their defaults.
        assert_eq!(config.engine.pid_path, "/var/run/haproxy.pid");
        assert_eq!(config.reconfigure.poll_interval_ms, 500);
    }
}
