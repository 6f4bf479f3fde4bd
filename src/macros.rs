//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. An optional tag
//! block may precede the format string.
//!
//! # Examples
//!
//! ```
//! use rust_tagged_logger::prelude::*;
//! use rust_tagged_logger::info;
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With tags
//! info!(logger, { "port" => port, "tls" => true }, "Server listening");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_tagged_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, { "retry" => 3 }, "Retrying {}", "upload");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, { $($key:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log_with_tags(
            $level,
            format!($($arg)+),
            $crate::core::Tags::new()$(.with($key, $value))*,
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_tagged_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_tagged_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_tagged_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_tagged_logger::error;
/// error!(logger, { "code" => 500 }, "Request failed: {}", "timeout");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::{SharedBuffer, WriterAppender};
    use crate::core::{Layout, LogLevel, Logger};

    fn l2met_logger() -> (Logger, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Logger::builder()
            .layout(Layout::L2met)
            .appender(WriterAppender::new(buffer.clone()))
            .build()
            .unwrap();
        (logger, buffer)
    }

    #[test]
    fn test_log_macro() {
        let (logger, buffer) = l2met_logger();
        log!(logger, LogLevel::Info, "Formatted: {}", 42);
        assert!(buffer.contents().contains("msg=\"Formatted: 42\""));
    }

    #[test]
    fn test_log_macro_with_tags() {
        let (logger, buffer) = l2met_logger();
        log!(logger, LogLevel::Warn, { "retry" => 3, "op" => "upload", }, "Retrying");
        let out = buffer.contents();
        assert!(out.contains("level=warn msg=Retrying op=upload retry=3\n"));
    }

    #[test]
    fn test_severity_macros() {
        let (logger, buffer) = l2met_logger();
        debug!(logger, "d {}", 1);
        info!(logger, "i");
        warn!(logger, { "k" => "v" }, "w");
        error!(logger, "e");
        fatal!(logger, "f");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("level=debug"));
        assert!(lines[2].ends_with("k=v"));
        assert!(lines[4].contains("level=fatal"));
    }
}
