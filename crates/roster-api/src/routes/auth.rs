//! Authentication routes

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::debug;

use roster_core::{validate, Profile, Registration};

use super::types::{LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, TokenResponse};
use crate::error::ApiError;
use crate::extract::RequireAuth;
use crate::state::AppState;

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state.auth.login(&request.email, &request.password)?;
    Ok(Json(TokenResponse::from(session)))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    validate::validate_name(&request.name)?;
    let email = validate::sanitize_email(&request.email);
    validate::validate_email(&email)?;
    validate::validate_password(&request.password)?;

    let phone = request
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(validate::normalize_phone)
        .transpose()?;

    let role = request
        .role
        .as_deref()
        .map(|r| {
            r.parse()
                .map_err(|_| ApiError::BadRequest(format!("Invalid role: {}", r)))
        })
        .transpose()?;

    debug!("Registration attempt for {}", email);

    let session = state.auth.register(Registration {
        name: request.name.trim().to_string(),
        email,
        phone,
        password: request.password,
        role,
    })?;

    Ok((StatusCode::CREATED, Json(TokenResponse::from(session))))
}

/// POST /api/v1/auth/refresh
async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let session = state.auth.refresh(&request.refresh_token)?;
    Ok(Json(RefreshResponse::from(session)))
}

/// GET /api/v1/auth/me
///
/// Returns the stored profile, not the token claims, so the response
/// reflects updates made since the token was issued.
async fn me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.auth.get_user(user.id)?))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/me", get(me))
}
