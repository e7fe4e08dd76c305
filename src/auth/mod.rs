//! # Auth Module
//!
//! Session lifecycle for the client: login and signup against the backend's
//! bearer-token endpoints, logout, and the cached user snapshot. Token
//! persistence lives in [`crate::store`]; expired-token recovery lives in
//! [`crate::http::refresh`].

pub mod manager;
pub mod models;
pub mod validators;

#[cfg(test)]
mod tests;

pub use manager::AuthManager;
pub use models::{AuthOutcome, Role, Session, SignupRequest, UserRecord};
