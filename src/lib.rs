//! A lightweight, level-filtered console logger.
//!
//! One process-wide [`LiteLogger`] buffers records from any number of threads
//! and writes them to the console either on demand ([`LiteLogger::flush`]) or
//! from a background flush thread ([`LiteLogger::set_threading`]). Call sites
//! log through a [`LogHandle`] bound at a chosen verbosity:
//!
//! ```rust,no_run
//! use lite_logger::{LiteLogger, LogLevel};
//!
//! let logger = LiteLogger::with_threading().expect("flush thread");
//! logger.set_color(true);
//!
//! let log = logger.get_log(LogLevel::Debug);
//! log.warning("disk almost full\nfree: 2%");
//! log.verbose("filtered out by the handle");
//!
//! logger.shutdown();
//! ```
//!
//! Output looks like:
//!
//! ```text
//! WARNING  :             src/main.rs:7 : disk almost full
//!                                        free: 2%
//! ```

// Severity ordering and parsing.
pub mod level;
// Fixed-width `file:line` caller column.
pub mod caller;
pub mod record;
// Record rendering.
pub mod formatter;
pub mod handle;
// The singleton logger and its flush thread.
pub mod manager;
pub mod config;
pub mod error;
#[macro_use]
pub mod macros;

pub use config::{LoggerConfig, OutputTarget};
pub use error::{LoggerError, Result};
pub use handle::LogHandle;
pub use level::LogLevel;
pub use manager::LiteLogger;
pub use record::LogRecord;

#[cfg(test)]
mod tests;
