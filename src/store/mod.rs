// src/store/mod.rs
//! Token and cached-user persistence, the browser-storage analog

use std::fs;
use std::path::PathBuf;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::models::UserRecord;

/// Passive persistence surface for the session.
///
/// Implementations hold exactly three values (access token, refresh token,
/// cached user) and apply no validation. All operations are synchronous so a
/// read-modify-write sequence is never split by an await point.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    /// Overwrites both tokens unconditionally.
    fn set_tokens(&self, access: &str, refresh: &str);
    /// Refresh path: replaces the access token, leaves the refresh token.
    fn set_access_token(&self, access: &str);
    /// Removes access, refresh, and cached user together.
    fn clear(&self);
    /// `None` on missing key or malformed JSON; decode failures are
    /// swallowed, not surfaced.
    fn stored_user(&self) -> Option<UserRecord>;
    fn set_stored_user(&self, user: &UserRecord);
}

/// Stored document, keyed the way the web client keyed browser storage.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(
        rename = "kukekodes_access_token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    access_token: Option<String>,
    #[serde(
        rename = "kukekodes_refresh_token",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    refresh_token: Option<String>,
    #[serde(
        rename = "kukekodes_user",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    user: Option<serde_json::Value>,
}

impl SessionDocument {
    fn decode_user(&self) -> Option<UserRecord> {
        self.user
            .clone()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    document: Mutex<SessionDocument>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.document.lock().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.document.lock().refresh_token.clone()
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut document = self.document.lock();
        document.access_token = Some(access.to_string());
        document.refresh_token = Some(refresh.to_string());
    }

    fn set_access_token(&self, access: &str) {
        self.document.lock().access_token = Some(access.to_string());
    }

    fn clear(&self) {
        *self.document.lock() = SessionDocument::default();
    }

    fn stored_user(&self) -> Option<UserRecord> {
        self.document.lock().decode_user()
    }

    fn set_stored_user(&self, user: &UserRecord) {
        match serde_json::to_value(user) {
            Ok(value) => self.document.lock().user = Some(value),
            Err(e) => warn!(error = %e, "failed to encode user for storage"),
        }
    }
}

/// File-backed store: one JSON document that survives restarts on this
/// machine, like the web client's browser storage survived reloads.
pub struct FileTokenStore {
    path: PathBuf,
    document: Mutex<SessionDocument>,
}

impl FileTokenStore {
    /// Loads the existing session file when present. A malformed file is
    /// treated as absent, the same way a malformed stored user decodes to
    /// nothing.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self {
            path,
            document: Mutex::new(document),
        }
    }

    // Best effort: the storage medium gives no transaction guarantees.
    fn persist(&self, document: &SessionDocument) {
        let text = match serde_json::to_string_pretty(document) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "failed to encode session document");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                let _ = fs::create_dir_all(parent);
            }
        }
        if let Err(e) = fs::write(&self.path, text) {
            warn!(path = %self.path.display(), error = %e, "failed to persist session");
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Option<String> {
        self.document.lock().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.document.lock().refresh_token.clone()
    }

    fn set_tokens(&self, access: &str, refresh: &str) {
        let mut document = self.document.lock();
        document.access_token = Some(access.to_string());
        document.refresh_token = Some(refresh.to_string());
        self.persist(&document);
    }

    fn set_access_token(&self, access: &str) {
        let mut document = self.document.lock();
        document.access_token = Some(access.to_string());
        self.persist(&document);
    }

    fn clear(&self) {
        let mut document = self.document.lock();
        *document = SessionDocument::default();
        self.persist(&document);
    }

    fn stored_user(&self) -> Option<UserRecord> {
        self.document.lock().decode_user()
    }

    fn set_stored_user(&self, user: &UserRecord) {
        let value = match serde_json::to_value(user) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "failed to encode user for storage");
                return;
            }
        };
        let mut document = self.document.lock();
        document.user = Some(value);
        self.persist(&document);
    }
}
