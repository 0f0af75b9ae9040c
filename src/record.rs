use crate::level::LogLevel;
use chrono::{DateTime, Local};
use std::time::Instant;

/// One queued log message.
///
/// Built at the call site, never mutated, and consumed exactly once when the
/// queue is drained.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Monotonic capture time, carried for callers that enqueue or inspect records.
    pub timestamp: Instant,
    /// Wall-clock capture time, only rendered when timestamps are enabled.
    pub logged_at: DateTime<Local>,
    /// Fixed-width `file:line` of the application call site.
    pub caller: String,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, caller: impl Into<String>, message: impl Into<String>) -> Self {
        LogRecord {
            level,
            timestamp: Instant::now(),
            logged_at: Local::now(),
            caller: caller.into(),
            message: message.into(),
        }
    }
}
