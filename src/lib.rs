//! # Rust Tagged Logger
//!
//! A leveled logger whose records carry per-call tags and render as either
//! a human-readable "traditional" line or an l2met `key=value` line.
//!
//! ## Features
//!
//! - **Payload Normalization**: strings, line sequences, ordered maps, and
//!   error values all render to one newline-terminated message
//! - **Per-Call Tags**: arbitrary key/value pairs travel with the record and
//!   merge into l2met output
//! - **Two Layouts**: traditional and l2met, chosen by configuration
//! - **Thread Safe**: one formatter shared by every logging thread
//!
//! ```
//! use rust_tagged_logger::prelude::*;
//!
//! let buffer = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .layout(Layout::L2met)
//!     .appender(WriterAppender::new(buffer.clone()))
//!     .build()
//!     .unwrap();
//!
//! logger.info_with_tags("message", Tags::new().with("foo", "bar"));
//! assert!(buffer.contents().contains("level=info msg=message foo=bar"));
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, SharedBuffer, WriterAppender};
    pub use crate::core::{
        Appender, ErrorPayload, FieldValue, FormatterConfig, Layout, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Payload, RecordFormatter,
        Result, Tags,
    };
}

pub use crate::appenders::{ConsoleAppender, FileAppender, SharedBuffer, WriterAppender};
pub use crate::core::{
    Appender, ErrorPayload, FieldValue, FormatterConfig, Layout, LogLevel, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Payload, RecordFields,
    RecordFormatter, Result, Tags, TimestampFormat,
};
