//! Browser label endpoint.

use axum::http::header::{HeaderMap, USER_AGENT};
use axum::{routing::get, Json, Router};

use crate::browser::{BrowserDescriptor, BrowserInfo, Environment};
use crate::state::AppState;

/// Raw `navigator.platform`, forwarded by the client shell.
const CLIENT_PLATFORM: &str = "x-client-platform";
/// Client hint fallback, sent quoted (e.g. `"Windows"`).
const PLATFORM_HINT: &str = "sec-ch-ua-platform";

/// Registers browser info routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/browser", get(browser_info))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Reads the probe's inputs from the request, preferring `X-Client-Platform`
/// over the `Sec-CH-UA-Platform` hint.
fn environment(headers: &HeaderMap) -> Environment {
    let user_agent = header_str(headers, USER_AGENT.as_str());
    let platform = match header_str(headers, CLIENT_PLATFORM) {
        "" => header_str(headers, PLATFORM_HINT).trim_matches('"'),
        raw => raw,
    };
    Environment::new(user_agent, platform)
}

/// Derives browser labels for the requesting client. Every request is a fresh
/// mount of the shell, so the descriptor is computed once for it.
async fn browser_info(headers: HeaderMap) -> Json<BrowserDescriptor> {
    let info = BrowserInfo::new();
    Json(info.mount(&environment(&headers)).clone())
}
