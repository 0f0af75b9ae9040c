// Convenience macros for logging through the published logger without
// holding a `LogHandle`.
// Each macro takes `format!`-style arguments. They only apply the logger's
// global output level, and do nothing when no logger has been created.

use crate::level::LogLevel;
use crate::manager::LiteLogger;
use std::fmt;

/// Backing function of the `log_*!` macros. Not part of the public API.
#[doc(hidden)]
#[track_caller]
pub fn emit(level: LogLevel, args: fmt::Arguments<'_>) {
    if let Some(logger) = LiteLogger::instance() {
        logger.get_log(LogLevel::Verbose).log(level, args);
    }
}

// `log_verbose!` for the chattiest tracing output.
#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => ($crate::macros::emit($crate::LogLevel::Verbose, format_args!($($arg)*)));
}

// `log_debug!` for detailed internal state.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => ($crate::macros::emit($crate::LogLevel::Debug, format_args!($($arg)*)));
}

// `log_info!` for general progress messages.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => ($crate::macros::emit($crate::LogLevel::Info, format_args!($($arg)*)));
}

// `log_warning!` for non-critical issues or noteworthy conditions.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => ($crate::macros::emit($crate::LogLevel::Warning, format_args!($($arg)*)));
}

// `log_error!` for failures the application recovers from.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => ($crate::macros::emit($crate::LogLevel::Error, format_args!($($arg)*)));
}

// `log_critical!` for failures requiring immediate attention.
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)*) => ($crate::macros::emit($crate::LogLevel::Critical, format_args!($($arg)*)));
}
