//! Logger configuration loaded from JSON
//!
//! Mirrors the nested config shape the logger is usually built from:
//!
//! ```json
//! {
//!   "log_level": "info",
//!   "logger": {
//!     "level": "warn",
//!     "format_type": "l2met",
//!     "time_format": "%Y-%m-%dT%H:%M:%S%.6f%:z",
//!     "thread_id": true,
//!     "process_id": true
//!   }
//! }
//! ```

use super::error::{LoggerError, Result};
use super::formatter::{FormatterConfig, Layout};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Level used when neither `logger.level` nor `log_level` is set
pub const DEFAULT_LEVEL: LogLevel = LogLevel::Debug;

/// Formatter and level options under the `logger` key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: Option<String>,
    pub format_type: Option<String>,
    pub time_format: Option<String>,
    pub thread_id: bool,
    pub process_id: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Fallback level when `logger.level` is absent
    pub log_level: Option<String>,
    pub logger: Option<LoggerSettings>,
}

impl LoggerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading logger config",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&contents)
    }

    /// Effective minimum level: `logger.level`, then `log_level`, then debug
    ///
    /// An unrecognized name is an error rather than a silent default.
    pub fn level(&self) -> Result<LogLevel> {
        let name = self
            .logger
            .as_ref()
            .and_then(|settings| settings.level.as_deref())
            .or(self.log_level.as_deref());

        match name {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_LEVEL),
        }
    }

    /// Formatter options, with the process name supplied by the caller
    pub fn formatter_config(&self, process_name: Option<String>) -> Result<FormatterConfig> {
        let settings = self.logger.clone().unwrap_or_default();

        let layout = match settings.format_type.as_deref() {
            Some(name) => name.parse::<Layout>()?,
            None => Layout::default(),
        };

        Ok(FormatterConfig {
            layout,
            time_format: settings.time_format,
            thread_id: settings.thread_id,
            process_id: settings.process_id,
            process_name,
        })
    }
}
