//! In-memory user store
//!
//! Used by tests and anywhere persistence is not needed.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// A simple in-memory implementation of `UserStore`
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        let mut users = self.users.write();

        let email = user.email.to_lowercase();
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(StoreError::Duplicate(format!(
                "User with email '{}' already exists",
                email
            )));
        }

        let record = User {
            id: Uuid::new_v4(),
            name: user.name,
            email,
            phone: user.phone,
            role: user.role,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.users.write();
        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound(format!("User {} not found", user.id)));
        }
        user.email = user.email.to_lowercase();
        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.write().remove(&id).is_some())
    }

    fn list(&self) -> Vec<User> {
        let mut records: Vec<User> = self.users.read().values().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        records
    }

    fn has_users(&self) -> bool {
        !self.users.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_insert_duplicate_and_delete() {
        let store = MemoryStore::new();
        let user = store
            .insert(NewUser {
                name: "Ann".to_string(),
                email: "Ann@x.com".to_string(),
                phone: None,
                role: Role::User,
                password_hash: "h".to_string(),
            })
            .unwrap();
        assert_eq!(user.email, "ann@x.com");

        let dup = store.insert(NewUser {
            name: "Other".to_string(),
            email: "ANN@X.COM".to_string(),
            phone: None,
            role: Role::User,
            password_hash: "h".to_string(),
        });
        assert!(matches!(dup, Err(StoreError::Duplicate(_))));

        assert!(store.delete(user.id).unwrap());
        assert!(!store.has_users());
    }
}
