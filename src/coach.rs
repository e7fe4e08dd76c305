// src/coach.rs
//! In-browser coding practice backends: code execution and the AI tutor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::Kukekodes;
use crate::common::ApiError;
use crate::http::RequestSpec;

#[derive(Debug, Serialize)]
struct CodeRunRequest {
    lesson_id: String,
    code: String,
}

/// Accepted submission; execution happens out of band and is polled.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeRun {
    pub submission_id: String,
    pub status: SubmissionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Queued,
    Running,
    Passed,
    Failed,
}

impl SubmissionState {
    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Passed | SubmissionState::Failed)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionStatus {
    pub id: String,
    pub status: SubmissionState,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct AiQueryRequest {
    lesson_id: String,
    question: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiAnswer {
    pub answer: String,
}

impl Kukekodes {
    /// Submits lesson code for execution; poll [`Kukekodes::submission_status`]
    /// until the state settles.
    pub async fn run_code(&self, lesson_id: &str, code: &str) -> Result<CodeRun, ApiError> {
        let payload = CodeRunRequest {
            lesson_id: lesson_id.to_string(),
            code: code.to_string(),
        };
        self.executor
            .request(RequestSpec::post("/code/run").json(&payload)?)
            .await
    }

    pub async fn submission_status(&self, submission_id: &str) -> Result<SubmissionStatus, ApiError> {
        self.executor
            .request(RequestSpec::get(format!("/code/submissions/{}", submission_id)))
            .await
    }

    /// Asks the AI tutor a question in the context of a lesson.
    pub async fn ask_ai(&self, lesson_id: &str, question: &str) -> Result<AiAnswer, ApiError> {
        let payload = AiQueryRequest {
            lesson_id: lesson_id.to_string(),
            question: question.to_string(),
        };
        self.executor
            .request(RequestSpec::post("/ai/query").json(&payload)?)
            .await
    }
}
