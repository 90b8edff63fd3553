//! Session API boundary: typed domain records and the transport trait.
//!
//! The controller depends on the [`SessionApi`] trait, not on HTTP, so tests
//! mock the transport and a future push-based transport can slot in without
//! touching the state machine.

mod dto;
mod http;

pub use dto::{ActiveSessionDto, FocusStatsDto, SessionDto, StartSessionRequest};
pub use http::HttpSessionApi;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ClientError;

/// Server-owned focus session, cached client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSession {
    /// Opaque identifier assigned by the server
    pub id: String,
    /// Authoritative start time (UTC milliseconds) — the single source of
    /// truth for elapsed time
    pub start_time_millis: i64,
    /// Ordered free-text intentions declared for the session
    pub goals: Vec<String>,
}

/// Result of polling `GET /focus/active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveSession {
    /// The user has a session open somewhere
    Active(FocusSession),
    /// No session is open for the user
    Inactive,
}

/// Aggregate statistics from `GET /focus/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusStats {
    /// Total focused time across all completed sessions, in whole seconds
    pub total_duration_secs: u64,
    /// Number of completed sessions
    pub total_sessions: u64,
    /// Consecutive days (ending today) with at least one completed session
    pub current_streak_days: u32,
}

/// Remote session endpoints.
///
/// Every failure is transient from the caller's perspective: no call mutates
/// local state, and no implementation retries on its own.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// `POST /focus/start` — open a session carrying the goal list; returns
    /// the session with the server-set start time.
    async fn start_session(&self, goals: Vec<String>) -> Result<FocusSession, ClientError>;

    /// `POST /focus/end` — close the caller's active session. Ending with no
    /// active session is not an error.
    async fn end_session(&self) -> Result<(), ClientError>;

    /// `GET /focus/active` — the authoritative "is a session open" answer.
    async fn active_session(&self) -> Result<ActiveSession, ClientError>;

    /// `GET /focus/stats` — aggregate statistics.
    async fn stats(&self) -> Result<FocusStats, ClientError>;
}
