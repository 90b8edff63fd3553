//! Wire DTOs for the focus endpoints and validation into domain records.
//!
//! The backend speaks camelCase JSON with ISO 8601 timestamps. DTOs are the
//! only place that shape is visible; everything past this module works with
//! the validated types in [`crate::api`]. A payload missing a required field
//! (`active`, `startTime`) is an error, never a trusted blob.

use serde::{Deserialize, Serialize};

use zazen_shared::time::parse_rfc3339_timestamp;

use crate::error::ClientError;

use super::{ActiveSession, FocusSession, FocusStats};

/// Body of `POST /focus/start`
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionRequest {
    pub goals: Vec<String>,
}

/// Session payload as returned by `/focus/start` and `/focus/active`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(default)]
    pub id: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Response of `GET /focus/active`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessionDto {
    pub active: bool,
    #[serde(default)]
    pub session: Option<SessionDto>,
}

/// Response of `GET /focus/stats`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusStatsDto {
    pub total_duration: u64,
    pub total_sessions: u64,
    pub current_streak: u32,
}

impl SessionDto {
    /// Validate the payload into a domain record. `startTime` must parse as
    /// RFC 3339; a missing `id` becomes an empty opaque identifier.
    pub fn into_domain(self) -> Result<FocusSession, ClientError> {
        let start_time_millis = parse_rfc3339_timestamp(&self.start_time).map_err(|e| {
            ClientError::InvalidResponse(format!("bad startTime '{}': {}", self.start_time, e))
        })?;

        Ok(FocusSession {
            id: self.id.unwrap_or_default(),
            start_time_millis,
            goals: self.goals,
        })
    }
}

impl ActiveSessionDto {
    /// Validate the poll payload. `active: true` without a session body is a
    /// contract violation and is reported as such.
    pub fn into_domain(self) -> Result<ActiveSession, ClientError> {
        if !self.active {
            return Ok(ActiveSession::Inactive);
        }

        let session = self.session.ok_or_else(|| {
            ClientError::InvalidResponse("active response without session payload".to_string())
        })?;

        Ok(ActiveSession::Active(session.into_domain()?))
    }
}

impl From<FocusStatsDto> for FocusStats {
    fn from(dto: FocusStatsDto) -> Self {
        Self {
            total_duration_secs: dto.total_duration,
            total_sessions: dto.total_sessions,
            current_streak_days: dto.current_streak,
        }
    }
}
