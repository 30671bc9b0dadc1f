//! Authentication extractors

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use roster_core::AuthUser;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Pull the bearer token out of an Authorization header
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Extractor for an authenticated user (required)
pub struct RequireAuth(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = app_state.auth.authenticate(bearer_token(&parts.headers))?;

        debug!(
            "Authenticated user: {} ({})",
            user.email,
            user.role.map(|r| r.as_str()).unwrap_or("none")
        );
        Ok(RequireAuth(user))
    }
}
