//! Navigation decision endpoint.
//!
//! The client shell calls `POST /navigate` before every route transition and
//! follows the returned redirect, if any.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::guard::{Action, GuardOutcome, Navigation, RenderPass};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers navigation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/navigate", post(navigate))
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NavigateRequest {
    pub path: String,
    /// Set by the server-side render pass, where the guard does not apply.
    #[serde(default)]
    pub server_render: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavigateResponse {
    Allow,
    Redirect {
        location: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        persisted: Option<String>,
    },
    Superseded,
}

impl From<Action> for NavigateResponse {
    fn from(action: Action) -> Self {
        match action {
            Action::Allow => NavigateResponse::Allow,
            Action::RedirectTo { location } => NavigateResponse::Redirect {
                location,
                persisted: None,
            },
            Action::PersistThenRedirect {
                location,
                persisted,
            } => NavigateResponse::Redirect {
                location,
                persisted: Some(persisted),
            },
        }
    }
}

/// Runs the navigation guard for the requested path.
///
/// Responds 200 with the decision, or 409 when a newer navigation replaced
/// this one while it was waiting for the identity SDK.
async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<(StatusCode, Json<NavigateResponse>), HTTPError> {
    if !request.path.starts_with('/') {
        return Err(HTTPError::new(
            StatusCode::BAD_REQUEST,
            "Navigation path must be absolute",
        ));
    }

    debug!("Navigation requested to '{}'", request.path);
    let navigation = Navigation {
        target: request.path,
        render: if request.server_render {
            RenderPass::Server
        } else {
            RenderPass::Client
        },
    };

    match state.guard.check(&navigation).await {
        GuardOutcome::Resolved(action) => Ok((StatusCode::OK, Json(action.into()))),
        GuardOutcome::Superseded => Ok((StatusCode::CONFLICT, Json(NavigateResponse::Superseded))),
    }
}
