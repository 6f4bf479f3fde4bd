//! Record formatter
//!
//! Renders a [`LogRecord`] into a single newline-terminated line in one of
//! two layouts:
//! - Traditional: `[time ]I [app[name]: ][PID=1 ][TID=2 ]message`
//! - L2met: `time=... level=info msg="..." app=... pid=1 tid=2 foo=bar`
//!
//! Rendering goes through three steps. The payload is normalized into a
//! message, a shared [`RecordFields`] set is built, and the fields are laid
//! out according to the configured [`Layout`].

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::log_record::{current_thread_id, LogRecord};
use super::payload::Payload;
use super::tags::{FieldValue, Tags};
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::str::FromStr;
use std::sync::OnceLock;

/// Keys that lead every l2met line, in this order
const BUILTIN_L2MET_KEYS: [&str; 3] = ["time", "level", "msg"];

/// Line layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Human-readable layout (default)
    ///
    /// Example: `I app[hub.1]: PID=4242 Request processed`
    #[default]
    Traditional,

    /// Key=value layout for line-oriented metrics extraction
    ///
    /// Example: `time=2025-01-08T10:30:45+00:00 level=info msg="Request processed"`
    L2met,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Traditional => "traditional",
            Layout::L2met => "l2met",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "traditional" => Ok(Layout::Traditional),
            "l2met" => Ok(Layout::L2met),
            _ => Err(LoggerError::config(
                "format_type",
                format!("unknown layout '{}', expected 'traditional' or 'l2met'", s),
            )),
        }
    }
}

/// Formatter configuration
///
/// # Examples
///
/// ```
/// use rust_tagged_logger::core::{FormatterConfig, Layout};
///
/// let config = FormatterConfig::new()
///     .with_layout(Layout::L2met)
///     .with_process_id(true)
///     .with_process_name("hub.1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterConfig {
    pub layout: Layout,
    /// strftime pattern used for every rendered timestamp
    pub time_format: Option<String>,
    /// Include the thread id (`TID=` / `tid=`)
    pub thread_id: bool,
    /// Include the process id (`PID=` / `pid=`)
    pub process_id: bool,
    /// Process name shown as `app`; supplied by the caller, never read from the environment
    pub process_name: Option<String>,
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_thread_id(mut self, include: bool) -> Self {
        self.thread_id = include;
        self
    }

    #[must_use]
    pub fn with_process_id(mut self, include: bool) -> Self {
        self.process_id = include;
        self
    }

    #[must_use]
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = Some(name.into());
        self
    }
}

/// Shared field set every layout draws from
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    /// Normalized message, ending with one `\n`
    pub message: String,
    pub process_id: u32,
    pub process_name: Option<String>,
    pub progname: Option<String>,
    pub severity: &'static str,
    pub severity_lowercase: &'static str,
    pub severity_initial: char,
    pub thread_id: u64,
    pub time: DateTime<Utc>,
    pub formatted_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    FormattedTime,
    SeverityInitial,
    App,
    ProcessId,
    ThreadId,
    Message,
}

/// Renders log records; shareable across threads
#[derive(Debug, Clone)]
pub struct RecordFormatter {
    config: FormatterConfig,
    time_format: Option<TimestampFormat>,
    traditional_plan: OnceLock<Vec<Segment>>,
}

impl RecordFormatter {
    /// Build a formatter, rejecting time patterns chrono cannot render
    pub fn new(mut config: FormatterConfig) -> Result<Self> {
        let time_format = config
            .time_format
            .as_deref()
            .map(TimestampFormat::custom)
            .transpose()?;

        if config.process_name.as_deref().is_some_and(str::is_empty) {
            config.process_name = None;
        }

        Ok(Self {
            config,
            time_format,
            traditional_plan: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn layout(&self) -> Layout {
        self.config.layout
    }

    /// Render a record into one newline-terminated line
    pub fn format(&self, record: &LogRecord) -> String {
        let fields = self.build_fields(
            record.level,
            record.timestamp,
            record.progname.as_deref(),
            record.thread_id,
            &record.payload,
        );
        self.layout_fields(&fields, &record.tags)
    }

    /// Render loose parts, attributing the line to the calling thread
    pub fn render(
        &self,
        level: LogLevel,
        time: DateTime<Utc>,
        progname: Option<&str>,
        payload: &Payload,
        tags: &Tags,
    ) -> String {
        let fields = self.build_fields(level, time, progname, current_thread_id(), payload);
        self.layout_fields(&fields, tags)
    }

    /// Shared field set for a record
    pub fn fields(&self, record: &LogRecord) -> RecordFields {
        self.build_fields(
            record.level,
            record.timestamp,
            record.progname.as_deref(),
            record.thread_id,
            &record.payload,
        )
    }

    fn build_fields(
        &self,
        level: LogLevel,
        time: DateTime<Utc>,
        progname: Option<&str>,
        thread_id: u64,
        payload: &Payload,
    ) -> RecordFields {
        let formatted_time = match (&self.time_format, self.config.layout) {
            (Some(format), _) => Some(format.format(&time)),
            (None, Layout::L2met) => Some(TimestampFormat::Iso8601.format(&time)),
            (None, Layout::Traditional) => None,
        };

        RecordFields {
            message: payload.to_message(),
            process_id: std::process::id(),
            process_name: self.config.process_name.clone(),
            progname: progname.map(String::from),
            severity: level.to_str(),
            severity_lowercase: level.to_lowercase_str(),
            severity_initial: level.initial(),
            thread_id,
            time,
            formatted_time,
        }
    }

    fn layout_fields(&self, fields: &RecordFields, tags: &Tags) -> String {
        match self.config.layout {
            Layout::Traditional => self.format_traditional(fields),
            Layout::L2met => self.format_l2met(fields, tags),
        }
    }

    fn traditional_plan(&self) -> &[Segment] {
        self.traditional_plan.get_or_init(|| {
            let mut plan = Vec::with_capacity(6);
            if self.time_format.is_some() {
                plan.push(Segment::FormattedTime);
            }
            plan.push(Segment::SeverityInitial);
            if self.config.process_name.is_some() {
                plan.push(Segment::App);
            }
            if self.config.process_id {
                plan.push(Segment::ProcessId);
            }
            if self.config.thread_id {
                plan.push(Segment::ThreadId);
            }
            plan.push(Segment::Message);
            plan
        })
    }

    fn format_traditional(&self, fields: &RecordFields) -> String {
        let mut line = String::with_capacity(fields.message.len() + 48);

        // Writing into a String cannot fail
        for segment in self.traditional_plan() {
            let _ = match segment {
                Segment::FormattedTime => match fields.formatted_time {
                    Some(ref time) => write!(line, "{} ", time),
                    None => Ok(()),
                },
                Segment::SeverityInitial => write!(line, "{} ", fields.severity_initial),
                Segment::App => write!(
                    line,
                    "app[{}]: ",
                    fields.process_name.as_deref().unwrap_or_default()
                ),
                Segment::ProcessId => write!(line, "PID={} ", fields.process_id),
                Segment::ThreadId => write!(line, "TID={} ", fields.thread_id),
                Segment::Message => line.write_str(&fields.message),
            };
        }

        line
    }

    fn format_l2met(&self, fields: &RecordFields, tags: &Tags) -> String {
        let mut pairs: BTreeMap<String, FieldValue> = BTreeMap::new();

        if let Some(ref time) = fields.formatted_time {
            pairs.insert("time".to_string(), FieldValue::from(time.as_str()));
        }
        pairs.insert("level".to_string(), FieldValue::from(fields.severity_lowercase));
        pairs.insert("msg".to_string(), FieldValue::from(fields.message.trim()));

        if self.config.thread_id {
            pairs.insert("tid".to_string(), FieldValue::from(fields.thread_id));
        }
        if self.config.process_id {
            pairs.insert("pid".to_string(), FieldValue::from(fields.process_id));
        }
        if let Some(ref app) = fields.process_name {
            pairs.insert("app".to_string(), FieldValue::from(app.as_str()));
        }

        // Caller tags win over built-ins
        for (key, value) in tags.iter() {
            pairs.insert(l2met_key(key), value.clone());
        }

        let mut parts = Vec::with_capacity(pairs.len());
        for key in BUILTIN_L2MET_KEYS {
            if let Some(value) = pairs.remove(key) {
                parts.push(l2met_pair(key, &value));
            }
        }
        parts.extend(pairs.iter().map(|(key, value)| l2met_pair(key, value)));

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }
}

impl Default for RecordFormatter {
    /// Traditional layout with no optional fields
    fn default() -> Self {
        Self {
            config: FormatterConfig::default(),
            time_format: None,
            traditional_plan: OnceLock::new(),
        }
    }
}

fn l2met_pair(key: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) if needs_quoting(s) => format!("{}={}", key, quote_value(s)),
        other => format!("{}={}", key, other),
    }
}

/// Tag key safe to emit bare: whitespace, `=` and `"` become `_`
fn l2met_key(key: &str) -> String {
    if key.is_empty() {
        return "_".to_string();
    }
    key.chars()
        .map(|c| if c.is_whitespace() || c == '=' || c == '"' { '_' } else { c })
        .collect()
}

fn needs_quoting(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || c == '"')
}

fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}
