// src/http/refresh.rs
//! Session refresh coordination for expired access tokens

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::models::{RefreshRequest, RefreshResponse};
use crate::common::helpers::safe_token_log;
use crate::common::ApiError;
use crate::store::TokenStore;

/// Exchanges the stored refresh token for a new access token after a 401.
///
/// Refreshing is single-flight: when several requests hit a 401 on the same
/// stale token, the first caller performs the exchange while the rest wait on
/// the same guard and pick up the replacement token. Any failure is terminal
/// for the session: the store is cleared before the error is returned.
pub struct RefreshCoordinator {
    client: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    inflight: Mutex<()>,
}

impl RefreshCoordinator {
    pub fn new(client: Client, base_url: String, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url,
            store,
            inflight: Mutex::new(()),
        }
    }

    /// Called with the access token the rejected request was sent with
    /// (`None` when it carried no token at all).
    pub async fn refresh_after_401(&self, stale_access: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.inflight.lock().await;

        // A concurrent caller may have finished the exchange while this one
        // waited on the guard; the stored token differing from the rejected
        // one means exactly that.
        if let Some(current) = self.store.access_token() {
            if stale_access != Some(current.as_str()) {
                debug!(
                    token = %safe_token_log(&current),
                    "access token already replaced by a concurrent refresh"
                );
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.store.refresh_token() else {
            warn!("no refresh token stored, ending session");
            return Err(self.expire());
        };

        debug!("exchanging refresh token for a new access token");

        let result = self
            .client
            .post(format!("{}/auth/refresh-token", self.base_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "refresh request failed to reach the server");
                return Err(self.expire());
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "refresh token rejected");
            return Err(self.expire());
        }

        let payload: RefreshResponse = match response.json().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "unreadable refresh response");
                return Err(self.expire());
            }
        };

        // Only the access token is replaced; the refresh token stays valid
        // until the server rotates it through a full login.
        self.store.set_access_token(&payload.access_token);
        debug!(
            token = %safe_token_log(&payload.access_token),
            expires_in = payload.expires_in,
            token_type = %payload.token_type,
            "access token refreshed"
        );

        Ok(payload.access_token)
    }

    fn expire(&self) -> ApiError {
        self.store.clear();
        ApiError::SessionExpired
    }
}
