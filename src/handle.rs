// Bound logger handle: a cheap, non-owning view of the logger fixed at one
// verbosity threshold.

use crate::caller;
use crate::level::LogLevel;
use crate::manager::LoggerState;
use crate::record::LogRecord;
use std::fmt::{self, Display};
use std::sync::Weak;

/// Per-caller view of the logger, obtained from [`crate::LiteLogger::get_log`].
///
/// A message goes through only if it passes this handle's threshold *and* the
/// logger's global output level. The handle holds a weak reference: once the
/// logger is shut down every call becomes a silent no-op.
///
/// All emitting methods record the location of the code that called them.
#[derive(Clone)]
pub struct LogHandle {
    state: Weak<LoggerState>, // non-owning; the registry owns the state
    level: LogLevel,          // this handle's own gate
}

impl LogHandle {
    pub(crate) fn new(state: Weak<LoggerState>, level: LogLevel) -> Self {
        LogHandle { state, level }
    }

    /// The threshold this handle was bound at.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Emits `message` at `level`.
    ///
    /// The message is only rendered to a string once the handle's gate passes;
    /// the logger's output gate is checked again when the record is queued.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Display) {
        // Cheapest check first: no allocation for filtered messages.
        if !level.passes(self.level) {
            return;
        }
        // The state is gone once every owner has dropped it.
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // A `LiteLogger` clone can keep a shut-down state allocated.
        if state.is_torn_down() {
            return;
        }
        // `capture` sees our caller because this method is `#[track_caller]`.
        state.enqueue(LogRecord::new(level, caller::capture(), message.to_string()));
    }

    // Convenience methods, one per emitting level.

    #[track_caller]
    pub fn verbose(&self, message: impl Display) {
        self.log(LogLevel::Verbose, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Display) {
        self.log(LogLevel::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn critical(&self, message: impl Display) {
        self.log(LogLevel::Critical, message);
    }
}

impl fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHandle")
            .field("level", &self.level)
            .field("attached", &(self.state.strong_count() > 0))
            .finish()
    }
}
