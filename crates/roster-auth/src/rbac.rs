//! Role-based permission model
//!
//! The role → permission table is fixed at compile time. Unknown or
//! absent roles resolve to the empty permission set, never an error.

use roster_store::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing a permission from a string
#[derive(Debug, Clone)]
pub struct ParsePermissionError(pub String);

impl fmt::Display for ParsePermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid permission: {}", self.0)
    }
}

impl std::error::Error for ParsePermissionError {}

/// Atomic capability tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // User management
    ViewUsers,
    CreateUsers,
    UpdateUsers,
    DeleteUsers,
    // Agenda/Events
    ViewAgenda,
    CreateEvents,
    UpdateEvents,
    DeleteEvents,
    ManageAgenda,
    // Dashboard
    ViewDashboard,
    ViewAnalytics,
    // Settings
    ViewSettings,
    UpdateProfile,
    DeleteAccount,
    // Registry
    ViewRegistry,
    ManageRegistry,
    // Admin
    AdminAccess,
    SystemSettings,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewUsers => "view_users",
            Permission::CreateUsers => "create_users",
            Permission::UpdateUsers => "update_users",
            Permission::DeleteUsers => "delete_users",
            Permission::ViewAgenda => "view_agenda",
            Permission::CreateEvents => "create_events",
            Permission::UpdateEvents => "update_events",
            Permission::DeleteEvents => "delete_events",
            Permission::ManageAgenda => "manage_agenda",
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewAnalytics => "view_analytics",
            Permission::ViewSettings => "view_settings",
            Permission::UpdateProfile => "update_profile",
            Permission::DeleteAccount => "delete_account",
            Permission::ViewRegistry => "view_registry",
            Permission::ManageRegistry => "manage_registry",
            Permission::AdminAccess => "admin_access",
            Permission::SystemSettings => "system_settings",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view_users" => Ok(Permission::ViewUsers),
            "create_users" => Ok(Permission::CreateUsers),
            "update_users" => Ok(Permission::UpdateUsers),
            "delete_users" => Ok(Permission::DeleteUsers),
            "view_agenda" => Ok(Permission::ViewAgenda),
            "create_events" => Ok(Permission::CreateEvents),
            "update_events" => Ok(Permission::UpdateEvents),
            "delete_events" => Ok(Permission::DeleteEvents),
            "manage_agenda" => Ok(Permission::ManageAgenda),
            "view_dashboard" => Ok(Permission::ViewDashboard),
            "view_analytics" => Ok(Permission::ViewAnalytics),
            "view_settings" => Ok(Permission::ViewSettings),
            "update_profile" => Ok(Permission::UpdateProfile),
            "delete_account" => Ok(Permission::DeleteAccount),
            "view_registry" => Ok(Permission::ViewRegistry),
            "manage_registry" => Ok(Permission::ManageRegistry),
            "admin_access" => Ok(Permission::AdminAccess),
            "system_settings" => Ok(Permission::SystemSettings),
            _ => Err(ParsePermissionError(s.to_string())),
        }
    }
}

// Admin has all permissions
const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewUsers,
    Permission::CreateUsers,
    Permission::UpdateUsers,
    Permission::DeleteUsers,
    Permission::ViewAgenda,
    Permission::CreateEvents,
    Permission::UpdateEvents,
    Permission::DeleteEvents,
    Permission::ManageAgenda,
    Permission::ViewDashboard,
    Permission::ViewAnalytics,
    Permission::ViewSettings,
    Permission::UpdateProfile,
    Permission::DeleteAccount,
    Permission::ViewRegistry,
    Permission::ManageRegistry,
    Permission::AdminAccess,
    Permission::SystemSettings,
];

// Volunteers can access agenda, dashboard, and basic settings
const VOLUNTEER_PERMISSIONS: &[Permission] = &[
    Permission::ViewAgenda,
    Permission::CreateEvents,
    Permission::UpdateEvents,
    Permission::ViewDashboard,
    Permission::ViewSettings,
    Permission::UpdateProfile,
    Permission::ViewRegistry,
];

// Patients, sponsors, and supporters share read access plus profile edits
const COMMUNITY_PERMISSIONS: &[Permission] = &[
    Permission::ViewAgenda,
    Permission::ViewDashboard,
    Permission::ViewSettings,
    Permission::UpdateProfile,
    Permission::ViewRegistry,
];

// Basic users have minimal access
const USER_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewSettings,
    Permission::UpdateProfile,
    Permission::ViewRegistry,
];

/// Permission → route-prefix table, in declaration order.
/// The order is preserved in `accessible_routes` output for stable
/// client rendering.
const ROUTE_TABLE: &[(Permission, &[&str])] = &[
    (Permission::ViewAgenda, &["/agenda", "/agenda/*"]),
    (Permission::ViewDashboard, &["/dashboard", "/dashboard/*"]),
    (Permission::ViewSettings, &["/settings", "/settings/*"]),
    (Permission::ViewRegistry, &["/registry", "/registry/*"]),
    (Permission::AdminAccess, &["/admin", "/admin/*"]),
];

/// Get the permission set for a role
pub fn permissions_for_role(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Volunteer => VOLUNTEER_PERMISSIONS,
        Role::Patient | Role::Sponsor | Role::Supporter => COMMUNITY_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
    }
}

/// Get the permission set for an optional role; `None` is the empty set
pub fn permissions_for(role: Option<Role>) -> &'static [Permission] {
    role.map(permissions_for_role).unwrap_or(&[])
}

/// Check if a role has a specific permission
pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Check if a role has any of the given permissions
pub fn has_any(role: Option<Role>, required: &[Permission]) -> bool {
    let granted = permissions_for(role);
    required.iter().any(|p| granted.contains(p))
}

/// Check if a role has all of the given permissions
pub fn has_all(role: Option<Role>, required: &[Permission]) -> bool {
    let granted = permissions_for(role);
    required.iter().all(|p| granted.contains(p))
}

/// Get the route patterns accessible to a role, in table order
pub fn accessible_routes(role: Option<Role>) -> Vec<&'static str> {
    let granted = permissions_for(role);
    let mut routes = Vec::new();
    for (permission, patterns) in ROUTE_TABLE {
        if granted.contains(permission) {
            routes.extend_from_slice(patterns);
        }
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_all_permissions() {
        assert_eq!(permissions_for_role(Role::Admin).len(), 18);
        assert!(has_all(Some(Role::Admin), ADMIN_PERMISSIONS));
    }

    #[test]
    fn test_unknown_role_is_empty_set() {
        assert!(permissions_for(None).is_empty());
        assert!(!has_permission(None, Permission::ViewDashboard));
        assert!(!has_any(None, ADMIN_PERMISSIONS));
        assert!(accessible_routes(None).is_empty());
    }

    #[test]
    fn test_user_role_minimal_access() {
        let role = Some(Role::User);
        assert!(has_permission(role, Permission::ViewDashboard));
        assert!(has_permission(role, Permission::UpdateProfile));
        assert!(!has_permission(role, Permission::ViewUsers));
        assert!(!has_permission(role, Permission::ViewAgenda));
        assert!(!has_permission(role, Permission::AdminAccess));
    }

    #[test]
    fn test_volunteer_can_manage_events() {
        let role = Some(Role::Volunteer);
        assert!(has_permission(role, Permission::CreateEvents));
        assert!(has_permission(role, Permission::UpdateEvents));
        assert!(!has_permission(role, Permission::DeleteEvents));
        assert!(!has_permission(role, Permission::ManageAgenda));
    }

    #[test]
    fn test_has_any_is_monotonic() {
        // If a role holds p, adding unrelated permissions to the query
        // never flips the answer
        for role in [Role::User, Role::Volunteer, Role::Patient] {
            for p in permissions_for_role(role) {
                assert!(has_any(Some(role), &[*p, Permission::SystemSettings]));
                assert!(has_any(Some(role), &[Permission::SystemSettings, *p]));
            }
        }
    }

    #[test]
    fn test_has_all_requires_every_permission() {
        let role = Some(Role::Patient);
        assert!(has_all(
            role,
            &[Permission::ViewAgenda, Permission::ViewDashboard]
        ));
        assert!(!has_all(
            role,
            &[Permission::ViewAgenda, Permission::CreateEvents]
        ));
        // Vacuously true on the empty requirement
        assert!(has_all(role, &[]));
    }

    #[test]
    fn test_accessible_routes_order_is_stable() {
        assert_eq!(
            accessible_routes(Some(Role::Admin)),
            vec![
                "/agenda",
                "/agenda/*",
                "/dashboard",
                "/dashboard/*",
                "/settings",
                "/settings/*",
                "/registry",
                "/registry/*",
                "/admin",
                "/admin/*",
            ]
        );
        assert_eq!(
            accessible_routes(Some(Role::User)),
            vec![
                "/dashboard",
                "/dashboard/*",
                "/settings",
                "/settings/*",
                "/registry",
                "/registry/*",
            ]
        );
    }

    #[test]
    fn test_permission_string_round_trip() {
        for p in ADMIN_PERMISSIONS {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), *p);
        }
        assert!("view_everything".parse::<Permission>().is_err());
    }
}
