use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Route and timing settings for the navigation guard.
///
/// Every field has a default, so an empty `guard:` section (or none at all)
/// yields the stock behaviour: `/login` and `/sign-up` are public, the wait
/// for the identity SDK polls every 100ms for at most 3000ms.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct GuardConfig {
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    /// Storage key holding the path to restore after sign-in.
    #[serde(default = "default_redirect_key")]
    pub redirect_key: String,
    /// Storage keys probed for a cached session token, in order.
    #[serde(default = "default_token_keys")]
    pub token_keys: Vec<String>,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_public_routes() -> Vec<String> {
    vec!["/login".to_string(), "/sign-up".to_string()]
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

fn default_redirect_key() -> String {
    "authRedirect".to_string()
}

fn default_token_keys() -> Vec<String> {
    vec![
        "clerk-session-token".to_string(),
        "__clerk_client_jwt".to_string(),
    ]
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_timeout_ms() -> u64 {
    3000
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_routes: default_public_routes(),
            login_path: default_login_path(),
            dashboard_path: default_dashboard_path(),
            redirect_key: default_redirect_key(),
            token_keys: default_token_keys(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl GuardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
