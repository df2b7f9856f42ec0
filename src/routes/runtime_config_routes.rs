//! Public runtime configuration for the client shell.

use axum::extract::State;
use axum::{routing::get, Json, Router};

use crate::config::PublicRuntimeConfig;
use crate::state::AppState;

/// Registers runtime config routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/runtime-config", get(runtime_config))
}

/// Only the public half of the identity config; the secret key never leaves
/// the process.
async fn runtime_config(State(state): State<AppState>) -> Json<PublicRuntimeConfig> {
    Json(state.config.identity.public())
}
