//! Timestamp formatting utilities
//!
//! Log lines carry either a caller-configured strftime pattern or, for the
//! l2met layout, an ISO 8601 timestamp with a numeric offset.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_tagged_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with("+00:00"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// ISO 8601 to the second with offset: `2025-01-08T10:30:45+00:00`
    #[default]
    Iso8601,

    /// Custom strftime format
    ///
    /// Build with [`TimestampFormat::custom`] to reject malformed patterns
    /// up front.
    Custom(String),
}

impl TimestampFormat {
    /// Validate and wrap a strftime pattern
    ///
    /// ```
    /// use rust_tagged_logger::core::TimestampFormat;
    ///
    /// assert!(TimestampFormat::custom("%Y-%m-%dT%H:%M:%S%.6f%:z").is_ok());
    /// assert!(TimestampFormat::custom("%Q").is_err());
    /// ```
    pub fn custom(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "time_format",
                format!("unsupported strftime pattern '{}'", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern.to_string()))
    }

    /// Format a `DateTime<Utc>` according to this format
    ///
    /// A pattern chrono cannot render falls back to the pattern text itself.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => format_str.clone(),
                }
            }
        }
    }
}
