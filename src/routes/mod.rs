//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups: navigation
//! decisions, identity state, the post-login redirect, browser labels,
//! public runtime config and health checks.

mod browser_routes;
mod health_routes;
mod identity_routes;
mod navigation_routes;
mod redirect_routes;
mod runtime_config_routes;

pub use navigation_routes::{NavigateRequest, NavigateResponse};
pub use redirect_routes::PendingRedirectResponse;

use crate::state::AppState;
use axum::Router;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(navigation_routes::routes())
        .merge(identity_routes::routes())
        .merge(redirect_routes::routes())
        .merge(browser_routes::routes())
        .merge(runtime_config_routes::routes())
        .merge(health_routes::routes())
        .with_state(state)
}
