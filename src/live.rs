// src/live.rs
//! Live session listings and attendance

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::Kukekodes;
use crate::common::{ApiError, Paginated};
use crate::http::RequestSpec;

#[derive(Debug, Clone, Deserialize)]
pub struct LiveSession {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    /// Minutes.
    pub duration: u32,
    /// Only present once the session has a room to join.
    #[serde(default)]
    pub meeting_url: Option<String>,
}

impl LiveSession {
    pub fn is_joinable(&self) -> bool {
        self.meeting_url.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiveAttendance {
    pub id: String,
    pub session_id: String,
    pub joined_at: DateTime<Utc>,
}

impl Kukekodes {
    pub async fn live_sessions(&self) -> Result<Paginated<LiveSession>, ApiError> {
        self.executor
            .request(RequestSpec::get("/live-sessions").public())
            .await
    }

    /// Records attendance for the authenticated learner.
    pub async fn join_live_session(&self, session_id: &str) -> Result<LiveAttendance, ApiError> {
        self.executor
            .request(RequestSpec::post(format!(
                "/live-sessions/{}/join",
                session_id
            )))
            .await
    }
}
