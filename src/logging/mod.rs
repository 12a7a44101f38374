//! Tracing subscriber setup.
//!
//! The crate only emits `tracing` events. Applications that want them
//! printed call [`init`] once at startup and keep the returned guard alive;
//! dropping it flushes the file writer. Tests use [`init_scoped`], which
//! installs the subscriber for the current thread only.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::dispatcher::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use crate::error::LoggingError;

fn default_level() -> String {
    "info".to_string()
}

fn default_file_name() -> String {
    "deckbattler.log".to_string()
}

fn default_true() -> bool {
    true
}

/// Logging options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directives used when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"rust_deckbattler::combat=debug"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Also write to `<directory>/<file_name>` when set.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Colorize stderr output.
    #[serde(default)]
    pub ansi: bool,
    /// Let `RUST_LOG` override `level`.
    #[serde(default = "default_true")]
    pub respect_env: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: None,
            file_name: default_file_name(),
            ansi: false,
            respect_env: true,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    #[must_use]
    pub fn with_respect_env(mut self, respect_env: bool) -> Self {
        self.respect_env = respect_env;
        self
    }
}

/// Keeps logging alive. Drop to flush and shut down.
#[must_use = "logging stops when the guard is dropped"]
pub struct LoggingGuard {
    _default: Option<DefaultGuard>,
    _file: Option<WorkerGuard>,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard")
            .field("scoped", &self._default.is_some())
            .field("file", &self._file.is_some())
            .finish()
    }
}

/// Install the process-wide subscriber.
pub fn init(config: &LogConfig) -> Result<LoggingGuard, LoggingError> {
    let (subscriber, file) = build(config)?;
    tracing::subscriber::set_global_default(subscriber).map_err(|_| LoggingError::AlreadyInstalled)?;
    tracing::info!(level = %config.level, "logging initialized");
    Ok(LoggingGuard {
        _default: None,
        _file: file,
    })
}

/// Install the subscriber for the current thread until the guard drops.
pub fn init_scoped(config: &LogConfig) -> Result<LoggingGuard, LoggingError> {
    let (subscriber, file) = build(config)?;
    let default = tracing::subscriber::set_default(subscriber);
    Ok(LoggingGuard {
        _default: Some(default),
        _file: file,
    })
}

fn build(
    config: &LogConfig,
) -> Result<(impl tracing::Subscriber + Send + Sync + 'static, Option<WorkerGuard>), LoggingError> {
    let filter = filter(config)?;

    let (file_writer, file_guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::Directory {
                path: dir.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::never(dir, &config.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let file_layer = file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_ansi(config.ansi);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);
    Ok((subscriber, file_guard))
}

fn filter(config: &LogConfig) -> Result<EnvFilter, LoggingError> {
    if config.respect_env {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(&config.level).map_err(|source| LoggingError::Filter {
        filter: config.level.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_file_logging() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig::default()
            .with_level("debug")
            .with_respect_env(false)
            .with_directory(dir.path().join("logs"));

        let guard = init_scoped(&config).unwrap();
        tracing::info!(enemy = "cultist", "ledger check");
        drop(guard);

        let text = std::fs::read_to_string(dir.path().join("logs").join("deckbattler.log")).unwrap();
        assert!(text.contains("ledger check"));
        assert!(text.contains("cultist"));
    }

    #[test]
    fn test_invalid_level_is_error() {
        let config = LogConfig::default()
            .with_level("rust_deckbattler=verbose")
            .with_respect_env(false);

        assert!(matches!(init_scoped(&config), Err(LoggingError::Filter { .. })));
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: LogConfig = serde_json::from_str(r#"{ "level": "warn" }"#).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.file_name, "deckbattler.log");
        assert!(config.respect_env);
        assert!(config.directory.is_none());
    }
}
