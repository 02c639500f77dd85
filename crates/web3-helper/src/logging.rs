use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, DEFAULT_LOG_CONFIG_PATH, LOG_CONFIG_ENV};

/// Installs a global fmt subscriber for `config`.
///
/// Returns `false` if a global subscriber was already set, in which case the
/// existing one stays in place. An unparsable filter falls back to `info`.
pub fn init_subscriber(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.target)
        .try_init()
        .is_ok()
}

/// Loads the logging config (from `$env_key` or `default_path`) and installs
/// it. Configuration errors are logged and the defaults are used instead.
pub fn setup_logging(default_path: &Path, default_level: &str, env_key: &str) -> LoggingConfig {
    let (config, load_error) =
        LoggingConfig::load(default_path, env_key, LoggingConfig::with_level(default_level));

    init_subscriber(&config);

    match load_error {
        Some(e) => tracing::warn!(error = %e, "error in logging configuration, using defaults"),
        None => tracing::debug!(level = %config.level, "logging configured"),
    }

    config
}

/// [`setup_logging`] with `logging.json`, level `info` and `LOG_CFG`.
pub fn setup_default_logging() -> LoggingConfig {
    setup_logging(Path::new(DEFAULT_LOG_CONFIG_PATH), "info", LOG_CONFIG_ENV)
}
