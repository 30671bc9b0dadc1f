//! Request/Response DTOs for the API

use roster_core::{Profile, RefreshedSession, SessionTokens};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==================== Auth Types ====================

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Token refresh request
#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair issued by login and registration
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: Profile,
}

impl From<SessionTokens> for TokenResponse {
    fn from(session: SessionTokens) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: "bearer".to_string(),
            expires_in: session.expires_in,
            user: session.user,
        }
    }
}

/// New access token returned by refresh
#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<RefreshedSession> for RefreshResponse {
    fn from(session: RefreshedSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            token_type: "bearer".to_string(),
            expires_in: session.expires_in,
        }
    }
}

// ==================== User Types ====================

/// Partial user update request
///
/// Absent fields are left unchanged. An empty phone string clears the
/// stored number; email is immutable.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

// ==================== Permission Types ====================

/// Single permission check result
#[derive(Serialize)]
pub struct PermissionCheckResponse {
    pub permission: String,
    pub has_permission: bool,
    pub user_role: Option<String>,
}

/// Routes accessible to the caller's role
#[derive(Serialize)]
pub struct AccessibleRoutesResponse {
    pub user_role: Option<String>,
    pub accessible_routes: Vec<String>,
}

/// Full role introspection for the caller
#[derive(Serialize)]
pub struct RoleInfoResponse {
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub user_email: String,
    pub user_role: Option<String>,
    pub permissions: Vec<String>,
    pub accessible_routes: Vec<String>,
    pub permission_count: usize,
}
