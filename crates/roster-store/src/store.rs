//! User store trait

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{NewUser, User};

/// User store trait
///
/// Implementations own the user records exclusively and serialize
/// read-modify-write operations internally, so callers never hold a
/// lock across password hashing or token work.
pub trait UserStore: Send + Sync {
    /// Look up a user by id
    fn find_by_id(&self, id: Uuid) -> Option<User>;

    /// Look up a user by email (case-insensitive)
    fn find_by_email(&self, email: &str) -> Option<User>;

    /// Insert a new user, failing on a duplicate email
    fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Replace an existing user record, bumping its updated_at
    fn update(&self, user: User) -> Result<User, StoreError>;

    /// Delete a user, returning whether a record was removed
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// List all users, ordered by name
    fn list(&self) -> Vec<User>;

    /// Check if any users exist
    fn has_users(&self) -> bool;
}
