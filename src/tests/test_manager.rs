use super::{fresh_logger, lines};
use crate::caller::CALLER_WIDTH;
use crate::formatter::LABEL_WIDTH;
use crate::config::LoggerConfig;
use crate::level::LogLevel;
use crate::manager::LiteLogger;
use crate::record::LogRecord;
use serial_test::serial;

/// Two constructions without shutdown share one instance and one queue.
#[test]
#[serial]
fn test_construction_returns_same_instance() {
    let (first, output) = fresh_logger();
    let second = LiteLogger::new();

    assert!(first.same_instance(&second));
    assert_eq!(first.id(), second.id());

    first.get_log(LogLevel::Info).info("from first");
    assert_eq!(second.pending(), 1);
    assert_eq!(second.flush(), 1);
    assert!(lines(&output)[0].ends_with(" : from first"));

    first.shutdown();
}

#[test]
#[serial]
fn test_new_instance_defaults() {
    let (logger, _output) = fresh_logger();
    assert_eq!(logger.output_level(), LogLevel::Info);
    assert!(!logger.color());
    assert!(!logger.timestamps());
    assert!(!logger.is_threaded());
    assert!(logger.is_active());
    assert_eq!(logger.pending(), 0);
    logger.shutdown();
}

#[test]
#[serial]
fn test_instance_does_not_create() {
    let (logger, _output) = fresh_logger();
    logger.shutdown();
    assert!(LiteLogger::instance().is_none());

    let created = LiteLogger::new();
    assert!(LiteLogger::instance().unwrap().same_instance(&created));
    created.shutdown();
}

/// A record is queued iff it passes both the handle gate and the global gate.
#[test]
#[serial]
fn test_double_gate_for_every_combination() {
    let (logger, _output) = fresh_logger();
    let thresholds = [
        LogLevel::Off,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
    ];

    for global in thresholds {
        logger.set_output_level(global);
        for local in thresholds {
            let log = logger.get_log(local);
            for message in LogLevel::ALL {
                log.log(message, "probe");
                let expected = usize::from(message <= local && message <= global);
                assert_eq!(
                    logger.pending(),
                    expected,
                    "message {message}, handle {local}, global {global}"
                );
                logger.flush();
            }
        }
    }
    logger.shutdown();
}

#[test]
#[serial]
fn test_flush_twice_writes_once() {
    let (logger, output) = fresh_logger();
    logger.get_log(LogLevel::Info).info("only once");

    assert_eq!(logger.flush(), 1);
    let after_first = output.lock().unwrap().clone();
    assert_eq!(logger.flush(), 0);
    assert_eq!(*output.lock().unwrap(), after_first);
    assert_eq!(lines(&output).len(), 1);
    logger.shutdown();
}

#[test]
#[serial]
fn test_flush_preserves_fifo_order() {
    let (logger, output) = fresh_logger();
    let log = logger.get_log(LogLevel::Verbose);
    logger.set_output_level(LogLevel::Verbose);

    log.error("A");
    log.verbose("B");
    log.info("C");
    logger.flush();

    let written = lines(&output);
    assert_eq!(written.len(), 3);
    assert!(written[0].starts_with("ERROR") && written[0].ends_with(" : A"));
    assert!(written[1].starts_with("VERBOSE") && written[1].ends_with(" : B"));
    assert!(written[2].starts_with("INFO") && written[2].ends_with(" : C"));
    logger.shutdown();
}

#[test]
#[serial]
fn test_output_level_change_is_not_retroactive() {
    let (logger, output) = fresh_logger();
    let log = logger.get_log(LogLevel::Verbose);

    log.debug("dropped at info");
    logger.set_output_level(LogLevel::Debug);
    log.debug("kept at debug");
    logger.set_output_level(LogLevel::Error);
    logger.flush();

    let written = lines(&output);
    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with(" : kept at debug"));
    logger.shutdown();
}

#[test]
#[serial]
fn test_color_applies_at_drain_time() {
    let (logger, output) = fresh_logger();
    let log = logger.get_log(LogLevel::Info);

    log.warning("plain");
    logger.flush();
    logger.set_color(true);
    log.warning("painted");
    logger.flush();

    let written = lines(&output);
    assert!(!written[0].contains('\x1b'));
    assert!(written[1].contains('\x1b'));
    logger.shutdown();
}

#[test]
#[serial]
fn test_multiline_message_is_aligned() {
    let (logger, output) = fresh_logger();
    logger.set_color(true);
    logger.get_log(LogLevel::Info).critical("first\nsecond");
    logger.flush();

    let written = lines(&output);
    assert_eq!(written.len(), 2);
    // Label, separator, caller column, separator; escapes add no width.
    let column = LABEL_WIDTH + " : ".len() + CALLER_WIDTH + " : ".len();
    assert!(written[0].ends_with(" : first"));
    assert_eq!(written[1].find("second"), Some(column));
    assert!(written[1][..column].chars().all(|c| c == ' '));
    logger.shutdown();
}

#[test]
#[serial]
fn test_direct_enqueue_applies_global_gate() {
    let (logger, output) = fresh_logger();
    logger.enqueue(LogRecord::new(LogLevel::Debug, "caller", "too verbose"));
    logger.enqueue(LogRecord::new(LogLevel::Warning, "caller", "kept"));
    assert_eq!(logger.flush(), 1);
    assert!(lines(&output)[0].contains("caller : kept"));
    logger.shutdown();
}

/// After shutdown old handles are inert and a new construction starts empty.
#[test]
#[serial]
fn test_shutdown_detaches_handles_and_allows_new_instance() {
    let (logger, output) = fresh_logger();
    let log = logger.get_log(LogLevel::Info);
    let old_id = logger.id();

    logger.shutdown();
    assert!(!logger.is_active());
    log.info("after shutdown");
    log.critical("still nothing");
    assert_eq!(logger.pending(), 0);
    assert_eq!(logger.flush(), 0);
    assert!(output.lock().unwrap().is_empty());

    let fresh = LiteLogger::new();
    assert_ne!(fresh.id(), old_id);
    assert!(!fresh.same_instance(&logger));
    assert_eq!(fresh.pending(), 0);

    // The stale handle must not reach the new instance either.
    log.info("stale");
    assert_eq!(fresh.pending(), 0);
    fresh.shutdown();
}

#[test]
#[serial]
fn test_shutdown_twice_is_harmless() {
    let (logger, _output) = fresh_logger();
    logger.shutdown();
    let next = LiteLogger::new();
    // A second shutdown of the old instance must not unpublish the new one.
    logger.shutdown();
    assert!(LiteLogger::instance().unwrap().same_instance(&next));
    next.shutdown();
}

#[test]
#[serial]
fn test_from_config_applies_only_on_creation() {
    if let Some(existing) = LiteLogger::instance() {
        existing.shutdown();
    }
    let config = LoggerConfig {
        output_level: LogLevel::Debug,
        color: true,
        timestamps: true,
        ..LoggerConfig::default()
    };
    let logger = LiteLogger::from_config(&config).unwrap();
    assert_eq!(logger.output_level(), LogLevel::Debug);
    assert!(logger.color());
    assert!(logger.timestamps());

    let other = LoggerConfig {
        output_level: LogLevel::Critical,
        ..LoggerConfig::default()
    };
    let same = LiteLogger::from_config(&other).unwrap();
    assert!(same.same_instance(&logger));
    assert_eq!(same.output_level(), LogLevel::Debug);
    logger.shutdown();
}

#[test]
#[serial]
fn test_debug_output_names_instance() {
    let (logger, _output) = fresh_logger();
    let rendered = format!("{:?}", logger);
    assert!(rendered.contains("LiteLogger"));
    assert!(rendered.contains(&format!("id: {}", logger.id())));
    logger.shutdown();
}
