//! In-crate tests for the logger singleton, handles and the flush thread.
//!
//! Every test that touches the process-wide instance is `#[serial]`: the
//! instance is shared by all tests in this binary.

use crate::manager::LiteLogger;
use std::sync::{Arc, Mutex};

pub mod test_manager;

/// Tears down whatever instance a previous test left behind, then creates a
/// fresh logger whose output goes to the returned buffer.
pub(crate) fn fresh_logger() -> (LiteLogger, Arc<Mutex<String>>) {
    if let Some(existing) = LiteLogger::instance() {
        existing.shutdown();
    }
    let logger = LiteLogger::new();
    let output = logger.capture_output();
    (logger, output)
}

/// Snapshot of everything written so far, one entry per output line.
pub(crate) fn lines(output: &Arc<Mutex<String>>) -> Vec<String> {
    output.lock().unwrap().lines().map(str::to_string).collect()
}
