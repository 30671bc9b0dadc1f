//! User management routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use tracing::debug;
use uuid::Uuid;

use roster_auth::Permission;
use roster_core::{validate, Profile, ProfileUpdate};

use super::types::UpdateUserRequest;
use crate::error::ApiError;
use crate::extract::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/users
async fn list_users(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    state.auth.require_any(&user, &[Permission::ViewUsers])?;
    Ok(Json(state.auth.list_users()))
}

/// GET /api/v1/users/{id}
async fn get_user(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    state.auth.require_any(&user, &[Permission::ViewUsers])?;
    Ok(Json(state.auth.get_user(id)?))
}

/// PUT /api/v1/users/{id}
async fn update_user(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<Profile>, ApiError> {
    state.auth.require_any(&user, &[Permission::UpdateUsers])?;

    debug!("Updating user: {}", id);

    let name = match request.name {
        Some(name) => {
            validate::validate_name(&name)?;
            Some(name.trim().to_string())
        }
        None => None,
    };

    // An empty phone string clears the stored number
    let phone = match request.phone.as_deref() {
        Some(p) if p.trim().is_empty() => Some(None),
        Some(p) => Some(Some(validate::normalize_phone(p)?)),
        None => None,
    };

    if let Some(password) = &request.password {
        validate::validate_password(password)?;
    }

    let role = request
        .role
        .as_deref()
        .map(|r| {
            r.parse()
                .map_err(|_| ApiError::BadRequest(format!("Invalid role: {}", r)))
        })
        .transpose()?;

    let profile = state.auth.update_user(
        id,
        ProfileUpdate {
            name,
            phone,
            password: request.password,
            role,
        },
    )?;

    Ok(Json(profile))
}

/// DELETE /api/v1/users/{id}
async fn delete_user(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.auth.require_any(&user, &[Permission::DeleteUsers])?;

    state.auth.delete_user(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create user routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users/{id}", get(get_user))
        .route("/api/v1/users/{id}", put(update_user))
        .route("/api/v1/users/{id}", delete(delete_user))
}
