//! Main logger implementation
//!
//! `Logger` is the call surface: one method per severity, each with a
//! `*_with_tags` twin. Every accepted call becomes a [`LogRecord`] carrying
//! the payload and its tags side by side, which the shared
//! [`RecordFormatter`] renders once before the line fans out to appenders.

use super::{
    appender::Appender,
    config::{LoggerConfig, DEFAULT_LEVEL},
    error::Result,
    formatter::{FormatterConfig, Layout, RecordFormatter},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    payload::Payload,
    tags::{Tags, PROGNAME_KEY},
};
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    formatter: Arc<RecordFormatter>,
    progname: Option<String>,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    /// Metrics for observability (dropped count, total logged, etc.)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with the default traditional formatter and no appenders
    #[must_use]
    pub fn new() -> Self {
        Self::with_formatter(RecordFormatter::default())
    }

    #[must_use]
    pub fn with_formatter(formatter: RecordFormatter) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(DEFAULT_LEVEL)),
            formatter: Arc::new(formatter),
            progname: None,
            appenders: Arc::new(RwLock::new(Vec::new())),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Build a logger from loaded configuration
    ///
    /// `process_name` is whatever the composition root observed for this
    /// process (usually an environment variable); `None` omits the `app` field.
    pub fn from_config(config: &LoggerConfig, process_name: Option<String>) -> Result<Self> {
        let level = config.level()?;
        let formatter = RecordFormatter::new(config.formatter_config(process_name)?)?;

        let mut logger = Self::with_formatter(formatter);
        logger.set_min_level(level);
        Ok(logger)
    }

    /// Per-appender panic isolation: one failing appender never keeps the
    /// others from receiving the line.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        record: &LogRecord,
        line: &str,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record, line)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        let mut appenders = self.appenders.write();
        appenders.push(appender);
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        let mut min_level = self.min_level.write();
        *min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    /// Source name stamped on every record
    pub fn set_progname(&mut self, progname: impl Into<String>) {
        self.progname = Some(progname.into());
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    pub fn log(&self, level: LogLevel, payload: impl Into<Payload>) {
        self.log_with_tags(level, payload, Tags::new());
    }

    /// Log with per-call tags
    ///
    /// A `progname` tag is dropped; the source name comes from the logger.
    pub fn log_with_tags(&self, level: LogLevel, payload: impl Into<Payload>, mut tags: Tags) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        tags.remove(PROGNAME_KEY);

        let mut record = LogRecord::new(level, payload).with_tags(tags);
        record.progname = self.progname.clone();

        let line = self.formatter.format(&record);
        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, &record, &line, &self.metrics);
    }

    /// Get the number of dropped logs
    ///
    /// Counts records that at least one appender failed to write.
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    pub fn debug(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Debug, payload);
    }

    #[inline]
    pub fn info(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Info, payload);
    }

    #[inline]
    pub fn warn(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Warn, payload);
    }

    #[inline]
    pub fn error(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Error, payload);
    }

    #[inline]
    pub fn fatal(&self, payload: impl Into<Payload>) {
        self.log(LogLevel::Fatal, payload);
    }

    #[inline]
    pub fn debug_with_tags(&self, payload: impl Into<Payload>, tags: Tags) {
        self.log_with_tags(LogLevel::Debug, payload, tags);
    }

    #[inline]
    pub fn info_with_tags(&self, payload: impl Into<Payload>, tags: Tags) {
        self.log_with_tags(LogLevel::Info, payload, tags);
    }

    #[inline]
    pub fn warn_with_tags(&self, payload: impl Into<Payload>, tags: Tags) {
        self.log_with_tags(LogLevel::Warn, payload, tags);
    }

    #[inline]
    pub fn error_with_tags(&self, payload: impl Into<Payload>, tags: Tags) {
        self.log_with_tags(LogLevel::Error, payload, tags);
    }

    #[inline]
    pub fn fatal_with_tags(&self, payload: impl Into<Payload>, tags: Tags) {
        self.log_with_tags(LogLevel::Fatal, payload, tags);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_tagged_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .layout(Layout::L2met)
///     .process_id(true)
///     .process_name("hub.1")
///     .appender(ConsoleAppender::new())
///     .build()
///     .expect("valid configuration");
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    formatter_config: FormatterConfig,
    progname: Option<String>,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: DEFAULT_LEVEL,
            formatter_config: FormatterConfig::default(),
            progname: None,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Replace the whole formatter configuration
    #[must_use = "builder methods return a new value"]
    pub fn formatter_config(mut self, config: FormatterConfig) -> Self {
        self.formatter_config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.formatter_config.layout = layout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.formatter_config.time_format = Some(pattern.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_id(mut self, include: bool) -> Self {
        self.formatter_config.thread_id = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn process_id(mut self, include: bool) -> Self {
        self.formatter_config.process_id = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn process_name(mut self, name: impl Into<String>) -> Self {
        self.formatter_config.process_name = Some(name.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn progname(mut self, progname: impl Into<String>) -> Self {
        self.progname = Some(progname.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Build the Logger
    ///
    /// Fails if the time pattern cannot be rendered.
    pub fn build(self) -> Result<Logger> {
        let formatter = RecordFormatter::new(self.formatter_config)?;
        let mut logger = Logger::with_formatter(formatter);

        logger.set_min_level(self.min_level);
        if let Some(progname) = self.progname {
            logger.set_progname(progname);
        }
        for appender in self.appenders {
            logger.add_appender(appender);
        }

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
