//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod payload;
pub mod tags;
pub mod timestamp;

pub use appender::Appender;
pub use config::{LoggerConfig, LoggerSettings};
pub use error::{LoggerError, Result};
pub use formatter::{FormatterConfig, Layout, RecordFields, RecordFormatter};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use payload::{ErrorPayload, Payload};
pub use tags::{FieldValue, Tags};
pub use timestamp::TimestampFormat;
