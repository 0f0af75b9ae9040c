// Severity model shared by both filtering gates (the per-handle gate and the
// logger-wide output gate).
//
// Levels are ordered from most restrictive (`Off`) to most permissive
// (`Verbose`). A message passes a gate when its level is *no more verbose*
// than the gate's threshold, i.e. `message <= threshold`.

use crate::error::LoggerError;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Severity of a log message, and the threshold type of every gate.
///
/// The numeric encoding grows with verbosity: `Off = 0` up to `Verbose = 6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Nothing is emitted. Only meaningful as a threshold.
    Off = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Verbose = 6,
}

impl LogLevel {
    /// Every level a message can actually be emitted at, most severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
    ];

    /// Returns the upper-case label used in formatted output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }

    /// Returns `true` when a message at `self` gets through a gate set to `threshold`.
    ///
    /// `Off` as a threshold admits nothing, and a message is never emitted at `Off`.
    pub fn passes(self, threshold: LogLevel) -> bool {
        self != LogLevel::Off && self <= threshold
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        match value {
            0 => Ok(LogLevel::Off),
            1 => Ok(LogLevel::Critical),
            2 => Ok(LogLevel::Error),
            3 => Ok(LogLevel::Warning),
            4 => Ok(LogLevel::Info),
            5 => Ok(LogLevel::Debug),
            6 => Ok(LogLevel::Verbose),
            other => Err(LoggerError::InvalidLevel(other.to_string())),
        }
    }
}

/// Parses a level name (case-insensitive, `warn` accepted) or its number `0`-`6`.
impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, LoggerError> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return LogLevel::try_from(number);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "verbose" => Ok(LogLevel::Verbose),
            _ => Err(LoggerError::InvalidLevel(trimmed.to_string())),
        }
    }
}

// Config files may spell a level either as a name or as its number.
struct LogLevelVisitor;

impl Visitor<'_> for LogLevelVisitor {
    type Value = LogLevel;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a log level name or a number between 0 and 6")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LogLevel, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<LogLevel, E> {
        u8::try_from(v)
            .map_err(|_| LoggerError::InvalidLevel(v.to_string()))
            .and_then(LogLevel::try_from)
            .map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<LogLevel, E> {
        u8::try_from(v)
            .map_err(|_| LoggerError::InvalidLevel(v.to_string()))
            .and_then(LogLevel::try_from)
            .map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LogLevelVisitor)
    }
}
