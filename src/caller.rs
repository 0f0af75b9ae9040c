// Caller location capture.
//
// Every emitting method on `LogHandle` is `#[track_caller]`, so
// `Location::caller()` resolves to the application call site rather than to
// logger internals. The location is rendered as a fixed-width `file:line`
// column so headers line up across records.

use std::panic::Location;

/// Width of the rendered caller column.
pub const CALLER_WIDTH: usize = 25;

const ELLIPSIS: &str = "...";

/// Renders `file:line` into exactly [`CALLER_WIDTH`] characters.
///
/// Short locations are right-aligned; long ones keep their tail (the file name
/// and line number are the useful part) behind a leading `...`.
pub fn format_caller(file: &str, line: u32) -> String {
    let full = format!("{}:{}", file, line);
    let len = full.chars().count();
    if len > CALLER_WIDTH {
        let keep = CALLER_WIDTH - ELLIPSIS.len();
        let tail: String = full.chars().skip(len - keep).collect();
        format!("{}{}", ELLIPSIS, tail)
    } else {
        format!("{:>width$}", full, width = CALLER_WIDTH)
    }
}

/// Captures the location of whoever called the outermost `#[track_caller]` frame.
#[track_caller]
pub fn capture() -> String {
    let location = Location::caller();
    format_caller(location.file(), location.line())
}
