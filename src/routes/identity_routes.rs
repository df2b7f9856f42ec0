//! Identity SDK bridge endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use tracing::info;

use crate::identity::{AuthState, AuthStateProvider};
use crate::state::AppState;

/// Registers identity state routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/identity", get(get_identity).put(put_identity))
}

/// Returns the identity state as last reported by the SDK.
async fn get_identity(State(state): State<AppState>) -> Json<AuthState> {
    Json(state.identity.snapshot())
}

/// Receives a state update from the SDK. Navigations waiting for the SDK to
/// load are released by this call.
async fn put_identity(
    State(state): State<AppState>,
    Json(update): Json<AuthState>,
) -> StatusCode {
    info!(
        "Identity SDK reported loaded={} signed_in={}",
        update.is_loaded, update.is_signed_in
    );
    state.identity.publish(update);
    StatusCode::NO_CONTENT
}
