//! Integration tests for the tagged logger
//!
//! These tests verify:
//! - Traditional layout output for each payload shape
//! - L2met layout fields, quoting, and tag merging
//! - Optional fields (time, thread id, process id, app name)
//! - Configuration loading and fail-fast errors
//! - File output

use rust_tagged_logger::appenders::{FileAppender, SharedBuffer, WriterAppender};
use rust_tagged_logger::core::{
    ErrorPayload, FormatterConfig, Layout, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, Payload, RecordFormatter, Tags,
};
use std::fs;
use tempfile::TempDir;

const MICROS_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

fn logger_with(builder: LoggerBuilder) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = builder
        .appender(WriterAppender::new(buffer.clone()))
        .build()
        .expect("valid configuration");
    (logger, buffer)
}

fn traditional() -> (Logger, SharedBuffer) {
    logger_with(Logger::builder())
}

fn l2met() -> (Logger, SharedBuffer) {
    logger_with(Logger::builder().layout(Layout::L2met))
}

/// `YYYY-MM-DDTHH:MM:SS`, optional fraction, UTC offset
fn looks_like_timestamp(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 25
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[10] == b'T'
        && bytes[13] == b':'
        && bytes[16] == b':'
        && s.ends_with("+00:00")
}

// ============================================================================
// Traditional layout
// ============================================================================

#[test]
fn test_traditional_severity_as_single_char() {
    let (logger, buffer) = traditional();
    logger.info("message");
    assert!(buffer.contents().starts_with("I "));
}

#[test]
fn test_traditional_includes_message() {
    let (logger, buffer) = traditional();
    logger.info("message");
    assert!(buffer.contents().ends_with(" message\n"));
}

#[test]
fn test_traditional_logs_a_string() {
    let (logger, buffer) = traditional();
    logger.info("hi");
    assert_eq!(buffer.contents(), "I hi\n");
}

#[test]
fn test_traditional_logs_an_exception() {
    let (logger, buffer) = traditional();
    let err = ErrorPayload::new("StandardError", "kaputt!").with_backtrace(["line 1", "line 2"]);
    logger.info(err);
    assert_eq!(buffer.contents(), "I StandardError: kaputt!\nline 1\nline 2\n");
}

#[test]
fn test_error_level_logs_message_and_backtrace() {
    let (logger, buffer) = traditional();
    let err = ErrorPayload::new("StandardError", "kaputt!").with_backtrace(["line 1", "line 2"]);
    logger.error(err);

    let out = buffer.contents();
    assert!(out.contains("kaputt!"));
    let first = out.find("line 1").expect("first frame");
    let second = out.find("line 2").expect("second frame");
    assert!(first < second);
}

#[test]
fn test_traditional_logs_a_std_error() {
    let (logger, buffer) = traditional();
    let err = "abc".parse::<u8>().unwrap_err();
    logger.error(Payload::from_error(&err));
    assert_eq!(
        buffer.contents(),
        format!("E ParseIntError: {}\n", err)
    );
}

#[test]
fn test_traditional_logs_an_array() {
    let (logger, buffer) = traditional();
    logger.info(["banana", "apple", "orange"]);
    assert_eq!(buffer.contents(), "I banana\napple\norange\n");
}

#[test]
fn test_traditional_logs_a_map() {
    let (logger, buffer) = traditional();
    logger.info(Payload::from(vec![
        ("attr1", rust_tagged_logger::FieldValue::from("value1")),
        ("attr2", rust_tagged_logger::FieldValue::from(2)),
    ]));
    assert_eq!(buffer.contents(), "I attr1=value1 attr2=2\n");
}

#[test]
fn test_traditional_logs_debug_fallback() {
    let (logger, buffer) = traditional();
    logger.debug(Payload::debug(&(1, "two")));
    assert_eq!(buffer.contents(), "D (1, \"two\")\n");
}

#[test]
fn test_traditional_timestamp_when_time_format_given() {
    let (logger, buffer) = logger_with(Logger::builder().time_format(MICROS_PATTERN));
    logger.info("message");

    let out = buffer.contents();
    let stamp = out.split(' ').next().expect("timestamp segment");
    assert!(looks_like_timestamp(stamp), "unexpected timestamp {:?}", stamp);
    assert_eq!(stamp.len(), "2025-01-08T10:30:45.123456+00:00".len());
    assert!(out.ends_with(" I message\n"));
}

#[test]
fn test_traditional_no_timestamp_without_time_format() {
    let (logger, buffer) = traditional();
    logger.info("message");
    assert_eq!(buffer.contents(), "I message\n");
}

#[test]
fn test_traditional_thread_id() {
    let (logger, buffer) = logger_with(Logger::builder().thread_id(true));
    logger.info("message");
    let out = buffer.contents();
    assert!(out.starts_with("I TID="));
    assert!(out.ends_with(" message\n"));
}

#[test]
fn test_traditional_process_id() {
    let (logger, buffer) = logger_with(Logger::builder().process_id(true));
    logger.info("message");
    assert_eq!(
        buffer.contents(),
        format!("I PID={} message\n", std::process::id())
    );
}

#[test]
fn test_traditional_process_name() {
    let (logger, buffer) = logger_with(Logger::builder().process_name("hub.1"));
    logger.info("message");
    assert_eq!(buffer.contents(), "I app[hub.1]: message\n");
}

#[test]
fn test_traditional_no_process_name_when_absent() {
    let (logger, buffer) = traditional();
    logger.info("message");
    assert!(!buffer.contents().contains("app["));
}

#[test]
fn test_traditional_tags_are_not_rendered() {
    let (logger, buffer) = traditional();
    logger.info_with_tags("message", Tags::new().with("foo", "bar"));
    assert_eq!(buffer.contents(), "I message\n");
}

#[test]
fn test_formatter_works_without_tags() {
    let formatter = RecordFormatter::default();
    let line = formatter.render(
        LogLevel::Debug,
        chrono::Utc::now(),
        Some("program"),
        &Payload::from("completely normal message"),
        &Tags::new(),
    );
    assert!(line.contains("completely normal message"));
}

// ============================================================================
// L2met layout
// ============================================================================

#[test]
fn test_l2met_includes_severity() {
    let (logger, buffer) = l2met();
    logger.info("message");
    assert!(buffer.contents().contains("level=info"));
}

#[test]
fn test_l2met_includes_quoted_message() {
    let (logger, buffer) = l2met();
    logger.info("message with spaces");
    assert!(buffer.contents().contains("msg=\"message with spaces\""));
}

#[test]
fn test_l2met_includes_message() {
    let (logger, buffer) = l2met();
    logger.info("message");
    assert!(buffer.contents().contains("msg=message"));
}

#[test]
fn test_l2met_timestamp_with_time_format() {
    let (logger, buffer) =
        logger_with(Logger::builder().layout(Layout::L2met).time_format(MICROS_PATTERN));
    logger.info("message");

    let out = buffer.contents();
    let stamp = out
        .strip_prefix("time=")
        .and_then(|rest| rest.split(' ').next())
        .expect("time field first");
    assert!(looks_like_timestamp(stamp));
    assert!(stamp.contains('.'));
}

#[test]
fn test_l2met_timestamp_defaults_to_iso8601() {
    let (logger, buffer) = l2met();
    logger.info("message");

    let out = buffer.contents();
    let stamp = out
        .strip_prefix("time=")
        .and_then(|rest| rest.split(' ').next())
        .expect("time field first");
    assert_eq!(stamp.len(), "2025-01-08T10:30:45+00:00".len());
    assert!(stamp.ends_with("+00:00"));
}

#[test]
fn test_l2met_thread_id() {
    let (logger, buffer) = logger_with(Logger::builder().layout(Layout::L2met).thread_id(true));
    logger.info("message");
    assert!(buffer.contents().contains(" tid="));

    let (logger, buffer) = l2met();
    logger.info("message");
    assert!(!buffer.contents().contains("tid="));
}

#[test]
fn test_l2met_process_id() {
    let (logger, buffer) = logger_with(Logger::builder().layout(Layout::L2met).process_id(true));
    logger.info("message");
    assert!(buffer.contents().contains(&format!("pid={}", std::process::id())));

    let (logger, buffer) = l2met();
    logger.info("message");
    assert!(!buffer.contents().contains("pid="));
}

#[test]
fn test_l2met_process_name() {
    let (logger, buffer) =
        logger_with(Logger::builder().layout(Layout::L2met).process_name("hub.1"));
    logger.info("message");
    assert!(buffer.contents().contains("app=hub.1"));

    let (logger, buffer) = l2met();
    logger.info("message");
    assert!(!buffer.contents().contains("app=hub.1"));
}

#[test]
fn test_l2met_arbitrary_key_value_pairs() {
    let (logger, buffer) = l2met();
    logger.info_with_tags("message", Tags::new().with("foo", "bar").with("energy", 9001));

    let out = buffer.contents();
    assert!(out.contains("foo=bar"));
    assert!(out.contains("energy=9001"));
    assert!(out.ends_with("msg=message energy=9001 foo=bar\n"));
}

#[test]
fn test_l2met_tag_overrides_builtin() {
    let (logger, buffer) = l2met();
    logger.info_with_tags("message", Tags::new().with("msg", "replaced"));
    let out = buffer.contents();
    assert!(out.contains("msg=replaced"));
    assert!(!out.contains("msg=message"));
}

#[test]
fn test_l2met_quotes_tag_values_with_spaces() {
    let (logger, buffer) = l2met();
    logger.warn_with_tags("m", Tags::new().with("user", "jane doe").with("q", "say \"hi\""));
    let out = buffer.contents();
    assert!(out.contains("user=\"jane doe\""));
    assert!(out.contains("q=\"say \\\"hi\\\"\""));
}

#[test]
fn test_l2met_exception_stays_on_one_line() {
    let (logger, buffer) = l2met();
    logger.error(ErrorPayload::new("StandardError", "kaputt!").with_backtrace(["line 1", "line 2"]));
    let out = buffer.contents();
    assert_eq!(out.matches('\n').count(), 1);
    assert!(out.contains("msg=\"StandardError: kaputt!\\nline 1\\nline 2\""));
}

// ============================================================================
// Formatter determinism
// ============================================================================

#[test]
fn test_formatting_same_record_twice_is_identical() {
    let formatter = RecordFormatter::new(
        FormatterConfig::new()
            .with_layout(Layout::L2met)
            .with_process_id(true)
            .with_thread_id(true)
            .with_process_name("hub.1"),
    )
    .unwrap();

    let record = LogRecord::new(LogLevel::Info, "same")
        .with_tags(Tags::new().with("z", 1).with("a", "x y").with("m", false));

    assert_eq!(formatter.format(&record), formatter.format(&record));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_logger_from_json_config() {
    let config = LoggerConfig::from_json(
        r#"{"log_level": "info",
            "logger": {"format_type": "l2met", "process_id": true}}"#,
    )
    .unwrap();

    let buffer = SharedBuffer::new();
    let mut logger = Logger::from_config(&config, Some("hub.1".to_string())).unwrap();
    logger.add_appender(Box::new(WriterAppender::new(buffer.clone())));

    logger.debug("filtered");
    logger.info("kept");

    let out = buffer.contents();
    assert!(!out.contains("filtered"));
    assert!(out.contains("level=info msg=kept app=hub.1 pid="));
}

#[test]
fn test_config_rejects_unknown_level() {
    let config = LoggerConfig::from_json(r#"{"logger": {"level": "shout"}}"#).unwrap();
    assert!(matches!(
        Logger::from_config(&config, None),
        Err(LoggerError::InvalidLevel(_))
    ));
}

#[test]
fn test_config_rejects_bad_time_format() {
    let config = LoggerConfig::from_json(r#"{"logger": {"time_format": "%Q"}}"#).unwrap();
    assert!(matches!(
        Logger::from_config(&config, None),
        Err(LoggerError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("logger.json");
    fs::write(&config_path, r#"{"logger": {"level": "error"}}"#).unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level().unwrap(), LogLevel::Error);
}

// ============================================================================
// File output
// ============================================================================

#[test]
fn test_file_appender_receives_rendered_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .layout(Layout::L2met)
        .appender(FileAppender::new(&log_file).expect("Failed to create appender"))
        .build()
        .unwrap();

    logger.info("first");
    logger.warn_with_tags("second", Tags::new().with("attempt", 2));
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("level=info msg=first"));
    assert!(lines[1].ends_with("level=warn msg=second attempt=2"));
}

#[test]
fn test_failing_appender_is_counted() {
    use rust_tagged_logger::core::{Appender, Result};

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _record: &LogRecord, _line: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "Simulated failure").into())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "FailingAppender"
        }
    }

    let logger = Logger::builder().appender(FailingAppender).build().unwrap();
    for _ in 0..5 {
        logger.info("Test message");
    }

    assert_eq!(logger.dropped_count(), 5, "Should track all dropped logs");
}
