// src/http/executor.rs
//! Outbound request building and response normalization

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::refresh::RefreshCoordinator;
use crate::common::config::ClientConfig;
use crate::common::error::{normalize_error, ApiError};
use crate::store::TokenStore;

/// One multipart field. Bodies are kept as plain data so the request can be
/// rebuilt for the single retry after a refresh.
#[derive(Debug, Clone)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    /// Passed through as-is, with no content-type override.
    File {
        name: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormField::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        FormField::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

/// What to call: relative endpoint, method, body, and whether the call runs
/// with the session's bearer token (the default).
#[derive(Debug, Clone)]
pub struct RequestSpec {
    endpoint: String,
    method: Method,
    body: RequestBody,
    requires_auth: bool,
}

impl RequestSpec {
    fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: RequestBody::Empty,
            requires_auth: true,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Calls that must never enter the refresh path: login, register, and
    /// the refresh exchange itself.
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Turns a [`RequestSpec`] into a parsed JSON body or a typed failure.
///
/// A 401 on an authenticated call is not surfaced directly: the refresh
/// coordinator gets one chance to replace the access token, after which the
/// original request is re-issued exactly once. The retried flag is the code
/// path itself; there is no loop that could retry twice.
pub struct RequestExecutor {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    refresh: RefreshCoordinator,
}

impl RequestExecutor {
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let refresh =
            RefreshCoordinator::new(client.clone(), config.base_url.clone(), store.clone());
        Self {
            client,
            base_url: config.base_url.clone(),
            store,
            refresh,
        }
    }

    /// Typed call. A 204 decodes as JSON null, so endpoints without a body
    /// are requested as `()`.
    pub async fn request<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, ApiError> {
        let value = self.send(spec).await?.unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    /// Core call: the parsed response body, or `None` for 204/empty.
    pub async fn send(&self, spec: RequestSpec) -> Result<Option<Value>, ApiError> {
        let bearer = if spec.requires_auth {
            self.store.access_token()
        } else {
            None
        };

        let response = self.execute(&spec, bearer.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && spec.requires_auth {
            debug!(endpoint = %spec.endpoint, "401 received, trying one refresh-and-retry");
            let fresh = self.refresh.refresh_after_401(bearer.as_deref()).await?;
            let retried = self.execute(&spec, Some(&fresh)).await?;
            if retried.status() == StatusCode::UNAUTHORIZED {
                // Retried exactly once; a second rejection ends the session.
                warn!(endpoint = %spec.endpoint, "retried request rejected again, ending session");
                self.store.clear();
                return Err(ApiError::SessionExpired);
            }
            return finalize(retried).await;
        }

        finalize(response).await
    }

    async fn execute(
        &self,
        spec: &RequestSpec,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, spec.endpoint);
        let mut request = self.client.request(spec.method.clone(), url);

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        request = match &spec.body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(value),
            RequestBody::Multipart(fields) => request.multipart(build_form(fields)),
        };

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(
                method = %spec.method,
                endpoint = %spec.endpoint,
                error = %e,
                "request failed to reach the server"
            );
            ApiError::Unreachable
        })?;

        debug!(
            method = %spec.method,
            endpoint = %spec.endpoint,
            status = %response.status(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        Ok(response)
    }
}

fn build_form(fields: &[FormField]) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File {
                name,
                file_name,
                bytes,
            } => form.part(
                name.clone(),
                reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.clone()),
            ),
        };
    }
    form
}

async fn finalize(response: reqwest::Response) -> Result<Option<Value>, ApiError> {
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Serialization(e.to_string()))?;

    if !status.is_success() {
        return Err(normalize_error(status.as_u16(), &text));
    }

    if text.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}
