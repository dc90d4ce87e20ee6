//! Secret and environment variable resolution.
//!
//! Values are resolved in order: a secrets file named `dfp_<lowercased key>`
//! in the secrets directory, then an environment variable of the same key,
//! then a caller-supplied default. Secret files win so that a value mounted
//! by the orchestrating platform overrides whatever the container environment
//! carries.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Where platform-mounted secrets live unless overridden.
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

const SECRET_FILE_PREFIX: &str = "dfp_";

/// Resolves configuration values from secret files and the environment.
#[derive(Debug, Clone)]
pub struct Resolver {
    secrets_dir: PathBuf,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_DIR)
    }
}

impl Resolver {
    /// Create a resolver reading secret files from `secrets_dir`.
    pub fn new(secrets_dir: impl Into<PathBuf>) -> Self {
        Self {
            secrets_dir: secrets_dir.into(),
        }
    }

    /// Resolve `key`: secret file, then environment variable, then `default`.
    ///
    /// Trailing newlines are stripped from secret file content since mounted
    /// secrets commonly end with one.
    pub fn secret_or_env(&self, key: &str, default: &str) -> String {
        let path = self
            .secrets_dir
            .join(format!("{}{}", SECRET_FILE_PREFIX, key.to_lowercase()));
        if let Ok(content) = fs::read_to_string(&path) {
            return content.trim_end_matches('\n').to_string();
        }
        match env::var(key) {
            Ok(value) if !value.is_empty() => value,
            _ => default.to_string(),
        }
    }

    /// Same resolution as [`secret_or_env`](Self::secret_or_env), with comma
    /// separators replaced by a newline plus the indentation expected inside
    /// a rendered configuration block.
    pub fn secret_or_env_split(&self, key: &str, default: &str) -> String {
        let value = self.secret_or_env(key, default);
        if value.is_empty() {
            value
        } else {
            value.replace(',', "\n    ")
        }
    }
}
