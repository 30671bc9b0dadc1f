//! Permission introspection routes
//!
//! All answers are derived from the caller's access token; these
//! handlers never write anything.

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};

use roster_auth::{accessible_routes, has_permission, permissions_for, Permission};

use super::types::{AccessibleRoutesResponse, PermissionCheckResponse, RoleInfoResponse};
use crate::error::ApiError;
use crate::extract::RequireAuth;
use crate::state::AppState;

/// GET /api/v1/permissions
async fn my_permissions(RequireAuth(user): RequireAuth) -> Json<Vec<String>> {
    Json(
        permissions_for(user.role)
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
    )
}

/// GET /api/v1/permissions/check/{permission}
async fn check_permission(
    RequireAuth(user): RequireAuth,
    Path(permission): Path<String>,
) -> Result<Json<PermissionCheckResponse>, ApiError> {
    let parsed: Permission = permission
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid permission: {}", permission)))?;

    Ok(Json(PermissionCheckResponse {
        has_permission: has_permission(user.role, parsed),
        permission,
        user_role: user.role.map(|r| r.as_str().to_string()),
    }))
}

/// GET /api/v1/permissions/routes
async fn my_routes(RequireAuth(user): RequireAuth) -> Json<AccessibleRoutesResponse> {
    Json(AccessibleRoutesResponse {
        user_role: user.role.map(|r| r.as_str().to_string()),
        accessible_routes: accessible_routes(user.role)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// GET /api/v1/permissions/role-info
async fn role_info(RequireAuth(user): RequireAuth) -> Json<RoleInfoResponse> {
    let permissions: Vec<String> = permissions_for(user.role)
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();

    Json(RoleInfoResponse {
        user_id: user.id,
        user_name: user.name.clone(),
        user_email: user.email.clone(),
        user_role: user.role.map(|r| r.as_str().to_string()),
        permission_count: permissions.len(),
        permissions,
        accessible_routes: accessible_routes(user.role)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

/// Create permission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/permissions", get(my_permissions))
        .route("/api/v1/permissions/check/{permission}", get(check_permission))
        .route("/api/v1/permissions/routes", get(my_routes))
        .route("/api/v1/permissions/role-info", get(role_info))
}
