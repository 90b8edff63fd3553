//! Time-related utilities with clock abstraction for testability.
//!
//! The wire contract uses ISO 8601 (RFC 3339) strings; internally everything
//! is a Unix timestamp in UTC milliseconds. The server's `startTime` is the
//! single source of truth for elapsed time, so the client never trusts its
//! own clock alone — it injects a [`Clock`] and reconciles against it.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, ParseError, SecondsFormat, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in UTC (milliseconds)
    fn now_utc_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc_millis(&self) -> i64 {
        get_utc_timestamp()
    }
}

/// Manually driven clock for tests: the reported time only moves when the
/// test sets or advances it, so countdown and drift scenarios run without
/// real waiting.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    /// Create a new manual clock starting at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    /// Set the reported time to an absolute timestamp
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Advance the reported time by whole seconds
    pub fn advance_secs(&self, secs: i64) {
        self.now.fetch_add(secs * 1000, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_utc_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Get current Unix timestamp in UTC (milliseconds)
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to an RFC 3339 string in UTC
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .expect("timestamp within chrono's representable range");
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 string (any offset) into UTC milliseconds
pub fn parse_rfc3339_timestamp(value: &str) -> Result<i64, ParseError> {
    let dt = DateTime::parse_from_rfc3339(value)?;
    Ok(dt.timestamp_millis())
}
