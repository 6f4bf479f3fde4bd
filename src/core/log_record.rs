//! Log record structure

use super::log_level::LogLevel;
use super::payload::Payload;
use super::tags::Tags;
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local cache so each thread allocates its id once
thread_local! {
    static THREAD_ID_CACHE: Cell<u64> = const { Cell::new(0) };
}

/// Small numeric id for the calling thread, stable for the thread's lifetime
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        if cache.get() == 0 {
            cache.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        cache.get()
    })
}

/// One log call: payload plus its tags and call-site metadata
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Source/program name
    pub progname: Option<String>,
    pub thread_id: u64,
    pub payload: Payload,
    pub tags: Tags,
}

impl LogRecord {
    pub fn new(level: LogLevel, payload: impl Into<Payload>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            progname: None,
            thread_id: current_thread_id(),
            payload: payload.into(),
            tags: Tags::new(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_progname(mut self, progname: impl Into<String>) -> Self {
        self.progname = Some(progname.into());
        self
    }

    pub fn with_thread_id(mut self, thread_id: u64) -> Self {
        self.thread_id = thread_id;
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}
