//! Console appender implementation

use crate::core::{Appender, LogLevel, LogRecord, Result};
use std::io::Write;

pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    /// Plain console output; rendered lines are written byte for byte
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Color whole lines by severity (requires the `console` feature)
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[cfg(feature = "console")]
    fn paint(&self, record: &LogRecord, line: &str) -> String {
        use colored::Colorize;

        if !self.use_colors {
            return line.to_string();
        }
        // Color the content only, so the terminator stays a bare newline
        let body = line.strip_suffix('\n').unwrap_or(line);
        format!("{}\n", body.color(record.level.color_code()))
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _record: &LogRecord, line: &str) -> String {
        line.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord, line: &str) -> Result<()> {
        let output = self.paint(record, line);

        // Route Error and Fatal levels to stderr, others to stdout
        match record.level {
            LogLevel::Error | LogLevel::Fatal => std::io::stderr().lock().write_all(output.as_bytes())?,
            _ => std::io::stdout().lock().write_all(output.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
