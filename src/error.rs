// Error types for the few logger operations that can actually fail.
// Emitting a log message never fails; only configuration loading and
// starting the background flush thread report errors back to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by configuration loading and thread management.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A level name or number did not map to any `LogLevel`.
    #[error("invalid log level '{0}' (expected one of off, critical, error, warning, info, debug, verbose or 0-6)")]
    InvalidLevel(String),

    /// The configuration file could not be read from disk.
    #[error("failed to read logger config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse YAML logger config: {0}")]
    ConfigParseYaml(#[from] serde_yaml::Error),

    #[error("failed to parse TOML logger config: {0}")]
    ConfigParseToml(#[from] toml::de::Error),

    /// The config file extension is neither `.yaml`, `.yml` nor `.toml`.
    #[error("unsupported logger config format: {0}")]
    UnsupportedConfigFormat(PathBuf),

    /// The OS refused to spawn the background flush thread.
    #[error("failed to spawn log flush thread: {0}")]
    ThreadSpawn(#[source] io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, LoggerError>;
