use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HelperError;

/// Environment variable that overrides the logging config path.
pub const LOG_CONFIG_ENV: &str = "LOG_CFG";

/// Default logging config file, relative to the working directory.
pub const DEFAULT_LOG_CONFIG_PATH: &str = "logging.json";

/// Logging settings read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"web3_sign=debug,info"`.
    pub level: String,
    /// Colored output.
    pub ansi: bool,
    /// Include the event target (module path) in each line.
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            ansi: true,
            target: false,
        }
    }
}

impl LoggingConfig {
    /// Same as the defaults but with a different filter directive.
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self, HelperError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| HelperError::Config(format!("{}: {e}", path.display())))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Loads the config from `$env_key` or else `default_path`.
    ///
    /// A missing file yields `fallback`. A file that exists but cannot be
    /// parsed also yields `fallback`, with the error returned alongside so
    /// the caller can report it once logging is up.
    pub fn load(
        default_path: &Path,
        env_key: &str,
        fallback: LoggingConfig,
    ) -> (Self, Option<HelperError>) {
        let path = resolve_path(default_path, env_key);
        if !path.exists() {
            return (fallback, None);
        }
        match Self::from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (fallback, Some(e)),
        }
    }
}

/// `$env_key` when set and non-empty, otherwise `default_path`.
pub fn resolve_path(default_path: &Path, env_key: &str) -> PathBuf {
    match std::env::var(env_key) {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => default_path.to_path_buf(),
    }
}
