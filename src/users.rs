// src/users.rs
//! User directory reads (admin dashboards, thread author lookups)

use crate::auth::UserRecord;
use crate::client::Kukekodes;
use crate::common::{ApiError, Paginated};
use crate::http::RequestSpec;

impl Kukekodes {
    pub async fn users(&self, page: Option<u32>) -> Result<Paginated<UserRecord>, ApiError> {
        let endpoint = match page {
            Some(page) => format!("/users?page={}", page),
            None => "/users".to_string(),
        };
        self.executor.request(RequestSpec::get(endpoint)).await
    }

    pub async fn user(&self, id: &str) -> Result<UserRecord, ApiError> {
        self.executor
            .request(RequestSpec::get(format!("/users/{}", id)))
            .await
    }
}
