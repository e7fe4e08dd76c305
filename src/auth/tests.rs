//! Tests for the auth module
//!
//! These cover the session lifecycle against a mock backend: login and
//! signup outcomes, logout guarantees, and the cached user snapshot.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::models::{Role, SignupRequest, UserRecord};
use super::AuthManager;
use crate::common::{ClientConfig, PasswordPolicy};
use crate::http::RequestExecutor;
use crate::store::{MemoryTokenStore, TokenStore};
use crate::testing::{auth_success_json, serve};

fn manager_against(base: &str) -> (AuthManager, Arc<dyn TokenStore>) {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let executor = Arc::new(RequestExecutor::new(&ClientConfig::new(base), store.clone()));
    let manager = AuthManager::new(executor, store.clone(), PasswordPolicy::default());
    (manager, store)
}

fn signup_request() -> SignupRequest {
    SignupRequest {
        email: "a@b.com".to_string(),
        password: "secret123".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        country: Some("KE".to_string()),
    }
}

#[tokio::test]
async fn login_with_valid_credentials_establishes_a_session() {
    let router = Router::new().route(
        "/auth/login",
        post(|Json(body): Json<Value>| async move {
            if body["email"] == "a@b.com" && body["password"] == "secret123" {
                Json(auth_success_json("access-1", "refresh-1")).into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Invalid email or password"})),
                )
                    .into_response()
            }
        }),
    );
    let base = serve(router).await;
    let (manager, store) = manager_against(&base);

    let outcome = manager.login("a@b.com", "secret123").await;

    assert!(outcome.success);
    assert!(outcome.error.is_none());
    assert!(store.access_token().is_some());
    assert!(store.refresh_token().is_some());

    let user = manager.current_user().expect("user cached in memory");
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.display_name(), "Ada Lovelace");
    assert_eq!(store.stored_user(), Some(user));
}

#[tokio::test]
async fn login_failure_folds_into_an_outcome_without_touching_the_store() {
    let router = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"detail": "Invalid email or password"})),
            )
        }),
    );
    let base = serve(router).await;
    let (manager, store) = manager_against(&base);

    let outcome = manager.login("a@b.com", "wrong").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Invalid email or password"));
    assert!(store.access_token().is_none());
    assert!(manager.current_user().is_none());
}

#[tokio::test]
async fn signup_validates_client_side_before_any_network_call() {
    // Nothing listens here; a network attempt would fail loudly.
    let (manager, store) = manager_against("http://127.0.0.1:9");

    let mut request = signup_request();
    request.password = "short".to_string();
    request.first_name = String::new();

    let outcome = manager.signup(request).await;

    assert!(!outcome.success);
    let error = outcome.error.expect("validation message");
    assert!(error.contains("first_name: First name is required"));
    assert!(error.contains("password: Password must be at least 8 characters"));
    assert!(store.access_token().is_none());
}

#[tokio::test]
async fn signup_success_stores_the_new_session() {
    let router = Router::new().route(
        "/auth/register",
        post(|Json(body): Json<Value>| async move {
            if body["first_name"] == "Ada" && body["country"] == "KE" {
                Json(auth_success_json("access-1", "refresh-1")).into_response()
            } else {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": "Bad payload"})),
                )
                    .into_response()
            }
        }),
    );
    let base = serve(router).await;
    let (manager, store) = manager_against(&base);

    let outcome = manager.signup(signup_request()).await;

    assert!(outcome.success, "signup failed: {:?}", outcome.error);
    assert_eq!(store.access_token().as_deref(), Some("access-1"));
    assert!(manager.current_user().is_some());
}

#[tokio::test]
async fn logout_clears_state_even_when_the_server_rejects_it() {
    let router = Router::new().route(
        "/auth/logout",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "boom"})),
            )
        }),
    );
    let base = serve(router).await;
    let (manager, store) = manager_against(&base);

    store.set_tokens("access-1", "refresh-1");
    manager.refresh_user();

    manager.logout().await;

    assert!(store.access_token().is_none());
    assert!(store.refresh_token().is_none());
    assert!(manager.current_user().is_none());
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn logout_clears_state_when_the_server_is_unreachable() {
    let (manager, store) = manager_against("http://127.0.0.1:9");
    store.set_tokens("access-1", "refresh-1");

    manager.logout().await;

    assert!(store.access_token().is_none());
    assert!(manager.current_user().is_none());
}

#[tokio::test]
async fn refresh_user_resyncs_the_memory_cache_from_the_store() {
    let (manager, store) = manager_against("http://127.0.0.1:9");
    assert!(manager.current_user().is_none());

    let user = UserRecord {
        id: "u-2".to_string(),
        email: "other@b.com".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        role: Role::Instructor,
        profile_picture: None,
        country: None,
    };
    store.set_stored_user(&user);

    manager.refresh_user();
    let cached = manager.current_user().expect("resynced");
    assert_eq!(cached, user);
    assert!(cached.can_manage_courses());
}

#[test]
fn display_name_falls_back_to_email_when_blank() {
    let user = UserRecord {
        id: "u-3".to_string(),
        email: "blank@b.com".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role: Role::Student,
        profile_picture: None,
        country: None,
    };
    assert_eq!(user.display_name(), "blank@b.com");
    assert!(!user.can_manage_courses());
}

#[test]
fn roles_use_the_backend_wire_names() {
    assert_eq!(
        serde_json::to_string(&Role::Student).expect("encode"),
        r#""student""#
    );
    let role: Role = serde_json::from_str(r#""admin""#).expect("decode");
    assert_eq!(role, Role::Admin);
}
