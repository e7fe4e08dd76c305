// src/common/config.rs
//! Client configuration, read from the environment with CLI override

use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_FILE: &str = "./kukekodes_session.json";

/// Password rules enforced client-side before the network call.
///
/// Observed deployments disagree on the minimum length (6 in older builds,
/// 8 in the current one), so it is a configurable value with the newest
/// default rather than a constant.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_len: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_len: 8 }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub password_policy: PasswordPolicy,
    /// Where the session survives restarts. `None` keeps it in memory only.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            password_policy: PasswordPolicy::default(),
            session_file: None,
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            env::var("KUKEKODES_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = env::var("KUKEKODES_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let min_len = env::var("KUKEKODES_PASSWORD_MIN_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| PasswordPolicy::default().min_len);

        let session_file =
            env::var("KUKEKODES_SESSION_FILE").unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string());

        Self {
            base_url: normalize_base_url(base_url),
            timeout: Duration::from_secs(timeout_secs),
            password_policy: PasswordPolicy { min_len },
            session_file: Some(PathBuf::from(session_file)),
        }
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Keep the session in memory only (tests, throwaway shells).
    pub fn in_memory(mut self) -> Self {
        self.session_file = None;
        self
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// CLI override for the API base URL: `--api-url <url>`.
pub fn apply_cli_override(mut config: ClientConfig) -> ClientConfig {
    let args: Vec<String> = env::args().collect();
    for pair in args.windows(2) {
        if pair[0] == "--api-url" {
            config.base_url = normalize_base_url(pair[1].clone());
        }
    }
    config
}
