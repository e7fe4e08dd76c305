// src/auth/manager.rs
//! Session lifecycle: login, signup, logout, and the in-memory user snapshot

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::models::{AuthOutcome, AuthResponse, LoginRequest, Session, SignupRequest, UserRecord};
use super::validators::SignupValidator;
use crate::common::helpers::safe_email_log;
use crate::common::{ApiError, PasswordPolicy, Validator};
use crate::http::{RequestExecutor, RequestSpec};
use crate::store::TokenStore;

/// Owner of the session.
///
/// The manager is the only writer of the token store on login, signup, and
/// logout; the refresh coordinator is the only other writer (access token
/// only). The in-memory user is a derived cache of the stored record, never
/// an independent source of truth.
pub struct AuthManager {
    executor: Arc<RequestExecutor>,
    store: Arc<dyn TokenStore>,
    validator: SignupValidator,
    user: RwLock<Option<UserRecord>>,
}

impl AuthManager {
    pub fn new(
        executor: Arc<RequestExecutor>,
        store: Arc<dyn TokenStore>,
        policy: PasswordPolicy,
    ) -> Self {
        // Resume a previous session on startup, the way the web client
        // rehydrated from browser storage on mount.
        let user = RwLock::new(store.stored_user());
        Self {
            executor,
            store,
            validator: SignupValidator::new(policy),
            user,
        }
    }

    /// Login failures are terminal: the call runs unauthenticated and never
    /// enters the refresh path.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.establish_session("/auth/login", &payload).await {
            Ok(session) => {
                info!(
                    email = %safe_email_log(email),
                    role = ?session.user.role,
                    "logged in"
                );
                AuthOutcome::ok()
            }
            Err(e) => {
                warn!(email = %safe_email_log(email), error = %e, "login failed");
                AuthOutcome::failed(e.to_string())
            }
        }
    }

    pub async fn signup(&self, request: SignupRequest) -> AuthOutcome {
        let check = self.validator.validate(&request);
        if !check.is_valid {
            debug!(errors = check.errors.len(), "signup rejected client-side");
            return AuthOutcome::failed(check.summary());
        }

        match self.establish_session("/auth/register", &request).await {
            Ok(session) => {
                info!(
                    email = %safe_email_log(&request.email),
                    role = ?session.user.role,
                    "account created"
                );
                AuthOutcome::ok()
            }
            Err(e) => {
                warn!(email = %safe_email_log(&request.email), error = %e, "signup failed");
                AuthOutcome::failed(e.to_string())
            }
        }
    }

    async fn establish_session<T: Serialize>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<Session, ApiError> {
        let response: AuthResponse = self
            .executor
            .request(RequestSpec::post(endpoint).json(payload)?.public())
            .await?;

        // Tokens are written pairwise so no partial session can be observed.
        self.store
            .set_tokens(&response.token.access_token, &response.token.refresh_token);
        self.store.set_stored_user(&response.user);

        let session = Session::from(response);
        *self.user.write() = Some(session.user.clone());
        Ok(session)
    }

    /// Best-effort server call; the local session is gone either way. The
    /// client must never stay authenticated-looking because a logout request
    /// failed.
    pub async fn logout(&self) {
        if let Err(e) = self.executor.send(RequestSpec::post("/auth/logout")).await {
            debug!(error = %e, "logout request failed, clearing local session anyway");
        }
        self.store.clear();
        *self.user.write() = None;
        info!("logged out");
    }

    /// Re-reads the stored user into memory. No network; this is the cache
    /// re-sync used when storage changed underneath the UI.
    pub fn refresh_user(&self) {
        *self.user.write() = self.store.stored_user();
    }

    pub fn current_user(&self) -> Option<UserRecord> {
        self.user.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.access_token().is_some()
    }
}
