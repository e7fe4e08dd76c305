// src/testing.rs
//! In-process mock backend helpers for the async test suites.
//!
//! The real backend is an external collaborator; tests stand it in with a
//! small axum router served on an ephemeral local port.

use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};

use crate::common::ClientConfig;
use crate::http::RequestExecutor;
use crate::store::{MemoryTokenStore, TokenStore};

/// Serves the router on an ephemeral port and returns its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });
    format!("http://{}", addr)
}

pub(crate) fn executor_with_store(base_url: &str) -> (RequestExecutor, Arc<dyn TokenStore>) {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let executor = RequestExecutor::new(&ClientConfig::new(base_url), store.clone());
    (executor, store)
}

pub(crate) fn student_user_json() -> Value {
    json!({
        "id": "u-1",
        "email": "a@b.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "role": "student"
    })
}

pub(crate) fn token_json(access: &str, refresh: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 1800
    })
}

pub(crate) fn auth_success_json(access: &str, refresh: &str) -> Value {
    json!({
        "user": student_user_json(),
        "token": token_json(access, refresh),
        "message": "Welcome back"
    })
}
