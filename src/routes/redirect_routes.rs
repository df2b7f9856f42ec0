//! Post-login redirect endpoint.

use axum::extract::State;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::storage::take_pending_redirect;
use crate::utils::http_helpers::HTTPError;

/// Registers redirect routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/redirect/consume", post(consume_pending_redirect))
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PendingRedirectResponse {
    pub target: Option<String>,
}

/// Returns the path saved when the user was sent to login, and clears it.
/// Called once after a successful sign-in.
async fn consume_pending_redirect(
    State(state): State<AppState>,
) -> Result<Json<PendingRedirectResponse>, HTTPError> {
    let target = take_pending_redirect(state.storage.as_ref(), state.guard.redirect_key()).await?;
    Ok(Json(PendingRedirectResponse { target }))
}
