// src/forum.rs
//! Community forum threads

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::Kukekodes;
use crate::common::{ApiError, Paginated};
use crate::http::{FormField, RequestSpec};

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadAuthor {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: ThreadAuthor,
    #[serde(default)]
    pub course_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

/// New thread payload. With an attachment the request goes out as multipart;
/// the file part is passed through untouched.
#[derive(Debug, Clone)]
pub struct NewThread {
    pub title: String,
    pub content: String,
    pub course_id: Option<String>,
    pub attachment: Option<ThreadAttachment>,
}

#[derive(Debug, Clone)]
pub struct ThreadAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Kukekodes {
    /// Threads, optionally narrowed to one course's forum.
    pub async fn threads(&self, course_id: Option<&str>) -> Result<Paginated<Thread>, ApiError> {
        let endpoint = match course_id {
            Some(id) => format!("/threads?course={}", urlencoding::encode(id)),
            None => "/threads".to_string(),
        };
        self.executor
            .request(RequestSpec::get(endpoint).public())
            .await
    }

    pub async fn thread(&self, id: &str) -> Result<Thread, ApiError> {
        self.executor
            .request(RequestSpec::get(format!("/threads/{}", id)).public())
            .await
    }

    pub async fn create_thread(&self, thread: NewThread) -> Result<Thread, ApiError> {
        let mut fields = vec![
            FormField::text("title", thread.title),
            FormField::text("content", thread.content),
        ];
        if let Some(course_id) = thread.course_id {
            fields.push(FormField::text("course_id", course_id));
        }
        if let Some(attachment) = thread.attachment {
            fields.push(FormField::file(
                "attachment",
                attachment.file_name,
                attachment.bytes,
            ));
        }
        self.executor
            .request(RequestSpec::post("/threads").multipart(fields))
            .await
    }
}
