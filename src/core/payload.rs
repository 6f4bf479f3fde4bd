//! Log payloads and their normalization into a message string
//!
//! A payload is whatever the caller hands to a severity method: a plain
//! string, a sequence of lines, an ordered mapping, an error value, or a
//! debug rendering of anything else. [`Payload::to_message`] turns each shape
//! into one canonical string that always ends with exactly one newline.

use super::tags::FieldValue;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// An error value captured for logging
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// Short type name of the error, e.g. `ParseIntError`
    pub kind: String,
    pub message: String,
    /// Stack frames, one per line
    pub backtrace: Option<Vec<String>>,
}

impl ErrorPayload {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            backtrace: None,
        }
    }

    /// Capture `err`, naming it by the short form of its static type
    ///
    /// The name comes from `E`, not from the value, so a trait object such
    /// as `&*Box<dyn Error>` is named just `Error`. Use [`with_kind`] when
    /// the concrete type is known only at runtime.
    ///
    /// ```
    /// use rust_tagged_logger::ErrorPayload;
    ///
    /// let boxed: Box<dyn std::error::Error> = "x".parse::<u8>().unwrap_err().into();
    /// let payload = ErrorPayload::from_error(&*boxed).with_kind("ParseIntError");
    /// assert_eq!(payload.kind, "ParseIntError");
    /// ```
    ///
    /// [`with_kind`]: ErrorPayload::with_kind
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::new(short_type_name::<E>(), err.to_string())
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_backtrace<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backtrace = Some(frames.into_iter().map(Into::into).collect());
        self
    }

    /// Attach a captured `std::backtrace::Backtrace`
    ///
    /// Disabled or unsupported backtraces leave the payload unchanged.
    pub fn with_captured_backtrace(self, backtrace: &Backtrace) -> Self {
        if backtrace.status() != BacktraceStatus::Captured {
            return self;
        }
        let rendered = backtrace.to_string();
        self.with_backtrace(rendered.lines().map(str::trim_end))
    }

    fn render(&self) -> String {
        let mut out = format!("{}: {}", self.kind, self.message);
        if let Some(frames) = self.backtrace.as_ref().filter(|f| !f.is_empty()) {
            out.push('\n');
            out.push_str(&frames.join("\n"));
        }
        out
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Raw message handed to the logger
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    /// Sequence of strings, rendered one per line
    Lines(Vec<String>),
    /// Ordered mapping, rendered as space-separated `key=value` pairs
    Map(Vec<(String, FieldValue)>),
    Error(ErrorPayload),
    /// Pre-rendered debug representation of any other value
    Debug(String),
}

impl Payload {
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Payload::Error(ErrorPayload::from_error(err))
    }

    /// Fallback for values with no dedicated shape
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Payload::Debug(format!("{:?}", value))
    }

    /// Normalize to the canonical message string
    ///
    /// Trailing whitespace is trimmed and exactly one `\n` is appended.
    pub fn to_message(&self) -> String {
        let body = match self {
            Payload::Text(s) => s.clone(),
            Payload::Lines(lines) => lines.join("\n"),
            Payload::Map(pairs) => pairs
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" "),
            Payload::Error(err) => err.render(),
            Payload::Debug(repr) => repr.clone(),
        };

        let mut message = body.trim_end().to_string();
        message.push('\n');
        message
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&String> for Payload {
    fn from(s: &String) -> Self {
        Payload::Text(s.clone())
    }
}

impl From<Vec<String>> for Payload {
    fn from(lines: Vec<String>) -> Self {
        Payload::Lines(lines)
    }
}

impl From<Vec<&str>> for Payload {
    fn from(lines: Vec<&str>) -> Self {
        Payload::Lines(lines.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Payload {
    fn from(lines: [&str; N]) -> Self {
        Payload::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}

impl<K, V> From<Vec<(K, V)>> for Payload
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Payload::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<ErrorPayload> for Payload {
    fn from(err: ErrorPayload) -> Self {
        Payload::Error(err)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Payload::Text(s),
            serde_json::Value::Object(map) => Payload::Map(
                map.into_iter()
                    .map(|(k, v)| (k, FieldValue::from(v)))
                    .collect(),
            ),
            serde_json::Value::Array(items) if items.iter().all(|v| v.is_string()) => {
                Payload::Lines(
                    items
                        .into_iter()
                        .filter_map(|v| match v {
                            serde_json::Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                )
            }
            other => Payload::Debug(other.to_string()),
        }
    }
}

/// Last path segment of a type name, without generic arguments
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
