// Renders a `LogRecord` into its printable, possibly multi-line form.
//
// Layout:   <LABEL  > : <caller column> : <first line of message>
//                                         <following lines, aligned>
//
// Alignment is always computed from the *uncolored* prefix, so the escape
// sequences added for color never shift continuation lines.

use crate::level::LogLevel;
use crate::record::LogRecord;
use colored::Color;

/// Width every severity label is padded to (the length of "CRITICAL").
pub const LABEL_WIDTH: usize = 8;

// SGR reset and bold codes. `colored` supplies the per-color codes; the
// wrapping is done here because `Colorize` drops color whenever stdout is not
// a tty, and the logger's own color flag must be the only switch.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "1;";
const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Rendering switches, snapshotted from the logger once per drained batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub color: bool,
    pub timestamps: bool,
}

/// Terminal color and weight used for a level's label.
fn label_style(level: LogLevel) -> (Color, bool) {
    match level {
        LogLevel::Critical => (Color::Red, true),
        LogLevel::Error => (Color::Red, false),
        LogLevel::Warning => (Color::Yellow, false),
        LogLevel::Info | LogLevel::Debug | LogLevel::Verbose | LogLevel::Off => (Color::White, false),
    }
}

/// Wraps `text` in the escape sequence for `color` (optionally bold) and a reset.
fn ansi_wrap(text: &str, color: Color, bold: bool) -> String {
    let weight = if bold { BOLD } else { "" };
    format!("\x1b[{}{}m{}{}", weight, color.to_fg_str(), text, RESET)
}

/// Paints an already padded label in its level's color.
fn paint(label: &str, level: LogLevel) -> String {
    let (color, bold) = label_style(level);
    ansi_wrap(label, color, bold)
}

/// Formats one record for output.
///
/// # Arguments
/// * `record` - the drained record.
/// * `options` - color and timestamp switches in effect for this drain.
///
/// # Returns
/// The rendered text without a trailing newline. Every line after the first
/// is indented to start under the first character of the message.
pub fn format_record(record: &LogRecord, options: &FormatOptions) -> String {
    let label = format!("{:<width$}", record.level.as_str(), width = LABEL_WIDTH);

    let mut plain_prefix = format!("{} : ", label);
    if options.timestamps {
        plain_prefix.push_str(&record.logged_at.format(TIMESTAMP_FORMAT).to_string());
        plain_prefix.push_str(" : ");
    }
    plain_prefix.push_str(&record.caller);
    plain_prefix.push_str(" : ");

    // Indent is measured in characters of the plain prefix.
    let indent = " ".repeat(plain_prefix.chars().count());

    let header_prefix = if options.color {
        format!("{}{}", paint(&label, record.level), &plain_prefix[label.len()..])
    } else {
        plain_prefix
    };

    let mut output = String::with_capacity(header_prefix.len() + record.message.len());
    for (idx, line) in record.message.split('\n').enumerate() {
        if idx == 0 {
            output.push_str(&header_prefix);
        } else {
            output.push('\n');
            output.push_str(&indent);
        }
        output.push_str(line);
    }
    output
}
