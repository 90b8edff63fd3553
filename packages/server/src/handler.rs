//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use zazen_shared::time::{get_utc_timestamp, timestamp_to_rfc3339};

use crate::state::{ActiveRecord, AppState, StoreError};

/// Body of `POST /focus/start`
#[derive(Debug, Deserialize)]
pub struct StartSessionBody {
    #[serde(default)]
    pub goals: Vec<String>,
}

/// Session payload returned by `/focus/start` and `/focus/active`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    pub id: String,
    pub start_time: String,
    pub goals: Vec<String>,
}

/// Response of `GET /focus/active`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSessionBody {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionBody>,
}

/// Response of `GET /focus/stats`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    pub total_duration: u64,
    pub total_sessions: u64,
    pub current_streak: u32,
}

impl From<ActiveRecord> for SessionBody {
    fn from(record: ActiveRecord) -> Self {
        Self {
            id: record.id,
            start_time: timestamp_to_rfc3339(record.started_at_millis),
            goals: record.goals,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Open a session. 409 when one is already active.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StartSessionBody>,
) -> Result<Json<SessionBody>, StatusCode> {
    let mut store = state.store.lock().await;
    match store.start(body.goals, get_utc_timestamp()) {
        Ok(record) => {
            tracing::info!("session {} started", record.id);
            Ok(Json(record.into()))
        }
        Err(StoreError::AlreadyActive) => Err(StatusCode::CONFLICT),
    }
}

/// Close the active session. Always 200: ending with nothing active is fine
/// from the client's perspective.
pub async fn end_session(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let mut store = state.store.lock().await;
    match store.end(get_utc_timestamp()) {
        Some(completed) => {
            tracing::info!("session ended after {}s", completed.duration_secs);
            Json(serde_json::json!({"ended": true}))
        }
        None => Json(serde_json::json!({"ended": false})),
    }
}

/// The authoritative "is a session open" answer
pub async fn active_session(State(state): State<Arc<AppState>>) -> Json<ActiveSessionBody> {
    let store = state.store.lock().await;
    let session = store.active().cloned().map(SessionBody::from);
    Json(ActiveSessionBody {
        active: session.is_some(),
        session,
    })
}

/// Aggregate statistics
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsBody> {
    let store = state.store.lock().await;
    let snapshot = store.stats(Utc::now().date_naive());
    Json(StatsBody {
        total_duration: snapshot.total_duration_secs,
        total_sessions: snapshot.total_sessions,
        current_streak: snapshot.current_streak_days,
    })
}
