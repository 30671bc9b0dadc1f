//! API routes

mod auth;
mod health;
mod permissions;
mod types;
mod users;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::require_route_permissions;
use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(users::routes())
        .merge(permissions::routes())
        .layer(from_fn_with_state(state.clone(), require_route_permissions))
        .with_state(state)
}
