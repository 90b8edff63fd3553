//! HTTP implementation of the session API.

use async_trait::async_trait;

use crate::error::ClientError;

use super::{
    ActiveSession, ActiveSessionDto, FocusSession, FocusStats, FocusStatsDto, SessionApi,
    SessionDto, StartSessionRequest,
};

/// Thin request/response wrapper over the focus endpoints.
///
/// No retries and no request timeouts by design: a slow call delays only its
/// own effect, and the polling loop's next iteration is independent.
pub struct HttpSessionApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSessionApi {
    /// Create a client for a server base URL (e.g. `http://127.0.0.1:8080`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn start_session(&self, goals: Vec<String>) -> Result<FocusSession, ClientError> {
        let response = self
            .http
            .post(self.url("/focus/start"))
            .json(&StartSessionRequest { goals })
            .send()
            .await
            .map_err(|e| ClientError::Transient(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Transient(format!(
                "start rejected with status {}",
                response.status()
            )));
        }

        let dto: SessionDto = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        dto.into_domain()
    }

    async fn end_session(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/focus/end"))
            .send()
            .await
            .map_err(|e| ClientError::Transient(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Transient(format!(
                "end rejected with status {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn active_session(&self) -> Result<ActiveSession, ClientError> {
        let response = self
            .http
            .get(self.url("/focus/active"))
            .send()
            .await
            .map_err(|e| ClientError::Transient(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Transient(format!(
                "status poll rejected with status {}",
                response.status()
            )));
        }

        let dto: ActiveSessionDto = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        dto.into_domain()
    }

    async fn stats(&self) -> Result<FocusStats, ClientError> {
        let response = self
            .http
            .get(self.url("/focus/stats"))
            .send()
            .await
            .map_err(|e| ClientError::Transient(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Transient(format!(
                "stats rejected with status {}",
                response.status()
            )));
        }

        let dto: FocusStatsDto = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(dto.into())
    }
}
