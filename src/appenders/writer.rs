//! Appender over any `io::Write`, plus an in-memory buffer target

use crate::core::{Appender, LogRecord, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Writes rendered lines to an arbitrary writer
///
/// # Example
///
/// ```
/// use rust_tagged_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .appender(WriterAppender::new(buffer.clone()))
///     .build()
///     .unwrap();
///
/// logger.info("hi");
/// assert_eq!(buffer.contents(), "I hi\n");
/// ```
pub struct WriterAppender<W: Write + Send + Sync> {
    writer: W,
    name: String,
}

impl<W: Write + Send + Sync> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> Appender for WriterAppender<W> {
    fn append(&mut self, _record: &LogRecord, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cloneable in-memory sink; every clone sees the same bytes
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
