//! Appender trait for log output destinations

use super::{error::Result, log_record::LogRecord};

/// Sink for rendered lines
///
/// `line` is already formatted and ends with `\n`; `record` is passed along
/// for appenders that route on level or other metadata.
pub trait Appender: Send + Sync {
    fn append(&mut self, record: &LogRecord, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
