// Logger configuration: defaults, file loading (YAML or TOML) and
// environment overrides.
//
// A config is only applied when it creates the process-wide logger; see
// `LiteLogger::from_config`.

use crate::error::{LoggerError, Result};
use crate::level::LogLevel;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `output_level`.
pub const ENV_LEVEL: &str = "LITE_LOG_LEVEL";
/// Environment variable overriding `color` (`1`/`true`/`yes`/`on` enable it).
pub const ENV_COLOR: &str = "LITE_LOG_COLOR";
/// Environment variable overriding `threading`.
pub const ENV_THREADING: &str = "LITE_LOG_THREADING";
/// When set to any non-empty value, color is forced off (https://no-color.org).
pub const ENV_NO_COLOR: &str = "NO_COLOR";

/// Console stream the logger writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Settings applied to a freshly created logger.
///
/// Every field is optional in a config file; missing ones take the defaults
/// below.
///
/// ```yaml
/// output_level: debug
/// color: true
/// threading: true
/// timestamps: false
/// target: stderr
/// flush_interval_ms: 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Global output gate. Defaults to `Info`.
    pub output_level: LogLevel,
    /// Paint severity labels with ANSI colors.
    pub color: bool,
    /// Start the background flush thread immediately.
    pub threading: bool,
    /// Add a wall-clock `HH:MM:SS.mmm` column after the label.
    pub timestamps: bool,
    pub target: OutputTarget,
    /// Longest time the flush thread sleeps when nothing wakes it.
    pub flush_interval_ms: u64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            output_level: LogLevel::Info,
            color: false,
            threading: false,
            timestamps: false,
            target: OutputTarget::Stdout,
            flush_interval_ms: 10,
        }
    }
}

impl LoggerConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads a config file, picking the parser from the file extension.
    ///
    /// # Arguments
    /// * `path` - path to a `.yaml`, `.yml` or `.toml` file. A leading `~` is
    ///   expanded to the user's home directory.
    ///
    /// # Returns
    /// * `Ok(LoggerConfig)` on success.
    /// * `Err(LoggerError)` if the file is unreadable, malformed, or has an
    ///   unknown extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = expand_tilde(path.as_ref());
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(LoggerError::UnsupportedConfigFormat(path)),
        };

        let contents = fs::read_to_string(&path).map_err(|source| LoggerError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config = parse(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded logger config");
        Ok(config)
    }

    /// Applies `LITE_LOG_*` and `NO_COLOR` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Applies overrides using `lookup` in place of the process environment.
    ///
    /// `NO_COLOR` wins over `LITE_LOG_COLOR`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.output_level = level.parse()?;
        }
        if let Some(color) = lookup(ENV_COLOR) {
            self.color = parse_flag(&color);
        }
        if let Some(threading) = lookup(ENV_THREADING) {
            self.threading = parse_flag(&threading);
        }
        if lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
        Ok(self)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms.max(1))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Expands a leading `~` to the current user's home directory.
/// Paths without `~`, or when no home directory can be found, are returned unchanged.
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
