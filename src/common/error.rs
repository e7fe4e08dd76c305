// src/common/error.rs
// Error handling types for the client

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Failures surfaced by the request layer.
///
/// `SessionExpired` is the only variant with a mandated side effect: by the
/// time it is returned, the local session has already been cleared.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Cannot reach the server. Please check your connection and try again.")]
    Unreachable,

    #[error("{0}")]
    Validation(String),

    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by the error, when one applies.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Backend error envelope: `{detail: string | [{loc, msg}], error_code?}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: Option<ErrorDetail>,
    error_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    loc: Vec<String>,
    msg: String,
}

impl FieldError {
    /// The offending field is the last `loc` segment; the leading segments
    /// ("body", "query") only say where the field was read from.
    fn field_name(&self) -> &str {
        self.loc.last().map(String::as_str).unwrap_or("field")
    }
}

/// Turn a non-2xx response body into a typed error.
///
/// Multi-field validation errors are flattened into one human-readable
/// message, one `field: msg` line each. Anything unparseable falls back to a
/// generic message carrying the status code.
pub fn normalize_error(status: u16, body: &str) -> ApiError {
    let envelope: Option<ErrorEnvelope> = serde_json::from_str(body).ok();

    if let Some(envelope) = &envelope {
        if let Some(code) = &envelope.error_code {
            debug!(status, error_code = %code, "server error carried an error code");
        }
    }

    match envelope.and_then(|e| e.detail) {
        Some(ErrorDetail::Fields(fields)) if !fields.is_empty() => {
            let message = fields
                .iter()
                .map(|f| format!("{}: {}", f.field_name(), f.msg))
                .collect::<Vec<_>>()
                .join("\n");
            ApiError::Validation(message)
        }
        Some(ErrorDetail::Message(message)) if !message.is_empty() => {
            ApiError::Http { status, message }
        }
        _ => ApiError::Http {
            status,
            message: format!("Request failed ({})", status),
        },
    }
}
