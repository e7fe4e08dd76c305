//! Request-layer behavior against a mock backend: refresh-and-retry,
//! terminal failures, and response normalization.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::common::ApiError;
use crate::http::RequestSpec;
use crate::testing::{executor_with_store, serve};

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Refresh endpoint that counts hits and hands out `fresh` tokens.
fn counting_refresh(hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/auth/refresh-token",
        post(move |Json(body): Json<Value>| {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                if body["refresh_token"] == "refresh-1" {
                    Json(json!({
                        "access_token": "fresh",
                        "token_type": "bearer",
                        "expires_in": 1800
                    }))
                    .into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"detail": "Unknown refresh token"})),
                    )
                        .into_response()
                }
            }
        }),
    )
}

/// Endpoint that 401s until the caller presents the refreshed token.
fn profile_accepting(expected: &'static str) -> Router {
    Router::new().route(
        "/profile",
        get(move |headers: HeaderMap| async move {
            if bearer(&headers) == Some(expected) {
                Json(json!({"ok": true})).into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Token expired"})),
                )
                    .into_response()
            }
        }),
    )
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_once() {
    let refresh_hits = Arc::new(AtomicUsize::new(0));
    let router = profile_accepting("fresh").merge(counting_refresh(refresh_hits.clone()));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    store.set_tokens("stale", "refresh-1");

    let value: Value = executor
        .request(RequestSpec::get("/profile"))
        .await
        .expect("retried call succeeds");

    assert_eq!(value["ok"], true);
    assert_eq!(refresh_hits.load(Ordering::SeqCst), 1);
    // Refresh replaced the access token only.
    assert_eq!(store.access_token().as_deref(), Some("fresh"));
    assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn failed_refresh_clears_session_with_fixed_message() {
    let refresh_hits = Arc::new(AtomicUsize::new(0));
    let router = profile_accepting("never").merge(counting_refresh(refresh_hits.clone()));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    // A refresh token the mock backend rejects.
    store.set_tokens("stale", "revoked");

    let err = executor
        .request::<Value>(RequestSpec::get("/profile"))
        .await
        .expect_err("session should end");

    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(err.to_string(), "Session expired. Please login again.");
    assert_eq!(refresh_hits.load(Ordering::SeqCst), 1);
    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
}

#[tokio::test]
async fn second_401_after_refresh_is_terminal_not_recursive() {
    let refresh_hits = Arc::new(AtomicUsize::new(0));
    // The refresh succeeds, but the endpoint rejects even the fresh token.
    let router = profile_accepting("never").merge(counting_refresh(refresh_hits.clone()));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    store.set_tokens("stale", "refresh-1");

    let err = executor
        .request::<Value>(RequestSpec::get("/profile"))
        .await
        .expect_err("session should end");

    assert!(matches!(err, ApiError::SessionExpired));
    // One refresh, one retry, no loop.
    assert_eq!(refresh_hits.load(Ordering::SeqCst), 1);
    assert!(store.access_token().is_none());
}

#[tokio::test]
async fn missing_refresh_token_ends_session_without_network_refresh() {
    let refresh_hits = Arc::new(AtomicUsize::new(0));
    let router = profile_accepting("never").merge(counting_refresh(refresh_hits.clone()));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    // No tokens stored at all.

    let err = executor
        .request::<Value>(RequestSpec::get("/profile"))
        .await
        .expect_err("session should end");

    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(refresh_hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unauthenticated_calls_bypass_the_refresh_coordinator() {
    let refresh_hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/auth/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Invalid email or password"})),
                )
            }),
        )
        .merge(counting_refresh(refresh_hits.clone()));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    store.set_tokens("stale", "refresh-1");

    let spec = RequestSpec::post("/auth/login")
        .json(&json!({"email": "a@b.com", "password": "nope"}))
        .expect("encode body")
        .public();
    let err = executor
        .request::<Value>(spec)
        .await
        .expect_err("login failures are terminal");

    assert_eq!(err.to_string(), "Invalid email or password");
    assert_eq!(err.status(), Some(401));
    assert_eq!(refresh_hits.load(Ordering::SeqCst), 0);
    // A failed login never touches the stored session.
    assert_eq!(store.access_token().as_deref(), Some("stale"));
}

#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() {
    let refresh_hits = Arc::new(AtomicUsize::new(0));
    let hits = refresh_hits.clone();
    let router = profile_accepting("fresh").merge(Router::new().route(
        "/auth/refresh-token",
        post(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                // Widen the race window so the sibling 401 lands mid-refresh.
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                Json(json!({
                    "access_token": "fresh",
                    "token_type": "bearer",
                    "expires_in": 1800
                }))
            }
        }),
    ));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    store.set_tokens("stale", "refresh-1");

    let (a, b) = tokio::join!(
        executor.request::<Value>(RequestSpec::get("/profile")),
        executor.request::<Value>(RequestSpec::get("/profile")),
    );

    assert_eq!(a.expect("first call succeeds")["ok"], true);
    assert_eq!(b.expect("second call succeeds")["ok"], true);
    assert_eq!(refresh_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn no_content_resolves_to_null_not_a_parse_error() {
    let router = Router::new().route("/courses/c-1", delete(|| async { StatusCode::NO_CONTENT }));
    let base = serve(router).await;

    let (executor, store) = executor_with_store(&base);
    store.set_tokens("access-1", "refresh-1");

    let body = executor
        .send(RequestSpec::delete("/courses/c-1"))
        .await
        .expect("204 is success");
    assert!(body.is_none());

    // And the typed path decodes the null into ().
    executor
        .request::<()>(RequestSpec::delete("/courses/c-1"))
        .await
        .expect("typed 204 decodes");
}

#[tokio::test]
async fn unreachable_server_maps_to_connection_error() {
    // Nothing listens on the discard port.
    let (executor, _store) = executor_with_store("http://127.0.0.1:9");

    let err = executor
        .request::<Value>(RequestSpec::get("/courses").public())
        .await
        .expect_err("nothing is listening");

    assert!(matches!(err, ApiError::Unreachable));
    assert_eq!(
        err.to_string(),
        "Cannot reach the server. Please check your connection and try again."
    );
}

#[tokio::test]
async fn server_validation_errors_flatten_over_the_wire() {
    let router = Router::new().route(
        "/auth/register",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "detail": [
                        {"loc": ["body", "email"], "msg": "invalid"},
                        {"loc": ["body", "country"], "msg": "unknown code"}
                    ]
                })),
            )
        }),
    );
    let base = serve(router).await;

    let (executor, _store) = executor_with_store(&base);
    let err = executor
        .request::<Value>(RequestSpec::post("/auth/register").public())
        .await
        .expect_err("validation fails");

    assert!(matches!(&err, ApiError::Validation(_)));
    assert_eq!(err.to_string(), "email: invalid\ncountry: unknown code");
}
