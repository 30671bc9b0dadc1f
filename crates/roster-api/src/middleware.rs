//! Route permission middleware
//!
//! Protected path prefixes are checked against a fixed table before the
//! handler runs. Handlers still authenticate through `RequireAuth`, so
//! a route missing from this table never skips authentication.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use roster_auth::Permission;
use tracing::debug;

use crate::error::ApiError;
use crate::extract::bearer_token;
use crate::state::AppState;

/// Path-prefix → required permission set, in declaration order.
/// The first matching prefix wins. An empty set requires a valid access
/// token but no particular permission; paths with no entry are public.
const ROUTE_PERMISSIONS: &[(&str, &[Permission])] = &[
    ("/api/v1/auth/me", &[]),
    ("/api/v1/users", &[Permission::ViewUsers]),
    ("/api/v1/permissions", &[]),
];

/// Look up the required permissions for a request path
fn required_permissions(path: &str) -> Option<&'static [Permission]> {
    ROUTE_PERMISSIONS
        .iter()
        .find(|(prefix, _)| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
        .map(|(_, required)| *required)
}

/// Permission middleware
///
/// Denies with 401 when the token is missing or invalid and 403 when
/// the role holds none of the required permissions.
pub async fn require_route_permissions(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path();
    if let Some(required) = required_permissions(path) {
        let user = state
            .auth
            .authorize(bearer_token(request.headers()), required)?;
        debug!("Route {} allowed for {}", path, user.email);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_permissions_prefix_match() {
        assert_eq!(
            required_permissions("/api/v1/users"),
            Some(&[Permission::ViewUsers][..])
        );
        assert_eq!(
            required_permissions("/api/v1/users/0a0b"),
            Some(&[Permission::ViewUsers][..])
        );
        assert_eq!(required_permissions("/api/v1/auth/me"), Some(&[][..]));
        assert_eq!(
            required_permissions("/api/v1/permissions/check/view_users"),
            Some(&[][..])
        );
    }

    #[test]
    fn test_public_paths_have_no_entry() {
        assert!(required_permissions("/api/v1/auth/login").is_none());
        assert!(required_permissions("/api/v1/auth/register").is_none());
        assert!(required_permissions("/api/v1/auth/refresh").is_none());
        assert!(required_permissions("/api/v1/health").is_none());
        // A prefix must match on a path segment boundary
        assert!(required_permissions("/api/v1/userspace").is_none());
    }
}
