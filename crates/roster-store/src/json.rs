//! JSON-file backed user store

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::StoreError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// On-disk document shape
#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<serde_json::Value>,
}

/// JSON-file backed user store
///
/// Holds the full record set in memory behind a lock and rewrites the
/// backing file atomically on every mutation. A missing or corrupt file
/// loads as an empty record set rather than failing.
pub struct JsonStore {
    path: PathBuf,
    users: RwLock<HashMap<Uuid, User>>,
}

impl JsonStore {
    /// Open a store at the given path, creating the file if absent
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let users = Self::load(&path);
        info!("Opened user store at {:?} ({} users)", path, users.len());

        let store = Self {
            path,
            users: RwLock::new(users),
        };
        if !store.path.exists() {
            store.persist(&store.users.read())?;
        }
        Ok(store)
    }

    /// Load records from disk, recovering from missing or corrupt data
    fn load(path: &Path) -> HashMap<Uuid, User> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Failed to read user store {:?}: {}", path, e);
                return HashMap::new();
            }
        };

        let file: UsersFile = match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                warn!("User store {:?} is corrupt, starting empty: {}", path, e);
                return HashMap::new();
            }
        };

        let mut users = HashMap::new();
        for value in file.users {
            match serde_json::from_value::<User>(value) {
                Ok(user) => {
                    users.insert(user.id, user);
                }
                Err(e) => {
                    // Skip malformed entries
                    warn!("Skipping malformed user record in {:?}: {}", path, e);
                }
            }
        }
        users
    }

    /// Write the record set to disk atomically
    ///
    /// Uses a write-to-temp-then-rename strategy so a crash mid-write
    /// leaves the original file intact.
    fn persist(&self, users: &HashMap<Uuid, User>) -> Result<(), StoreError> {
        let mut records: Vec<&User> = users.values().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let file = UsersFile {
            users: records
                .into_iter()
                .map(serde_json::to_value)
                .collect::<Result<_, _>>()?,
        };
        let content = serde_json::to_string_pretty(&file)?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;

        {
            let mut f = temp_file.as_file();
            f.write_all(content.as_bytes())?;
            f.sync_all()?;
        }

        // Restrictive permissions: the file holds password hashes
        #[cfg(unix)]
        {
            let metadata = temp_file.as_file().metadata()?;
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(temp_file.path(), perms)?;
        }

        temp_file
            .persist(&self.path)
            .map_err(|e| StoreError::Persist(format!("{:?}: {}", self.path, e)))?;

        Ok(())
    }
}

impl UserStore for JsonStore {
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

        if let Err(e) = self.persist(&users) {
            users.remove(&record.id);
            return Err(e);
        }
        Ok(record)
    }

    fn update(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.users.write();

        let previous = users
            .get(&user.id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", user.id)))?;

        user.email = user.email.to_lowercase();
        user.updated_at = Utc::now();
        users.insert(user.id, user.clone());

        if let Err(e) = self.persist(&users) {
            users.insert(previous.id, previous);
            return Err(e);
        }
        Ok(user)
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut users = self.users.write();

        let Some(previous) = users.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&users) {
            users.insert(previous.id, previous);
            return Err(e);
        }
        Ok(true)
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

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            role: Role::User,
            password_hash: "$argon2id$test-hash".to_string(),
        }
    }

    #[test]
    fn test_insert_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("users.json")).unwrap();

        let user = store.insert(new_user("Ann", "Ann@x.com")).unwrap();
        assert_eq!(user.email, "ann@x.com");

        let by_id = store.find_by_id(user.id).unwrap();
        assert_eq!(by_id.name, "Ann");

        // Lookup is case-insensitive
        let by_email = store.find_by_email("ANN@X.COM").unwrap();
        assert_eq!(by_email.id, user.id);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("users.json")).unwrap();

        store.insert(new_user("Ann", "ann@x.com")).unwrap();
        let result = store.insert(new_user("Other", "A@X.com"));
        assert!(matches!(result, Err(StoreError::Duplicate(_))));
    }

    #[test]
    fn test_update_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("users.json")).unwrap();

        let mut user = store.insert(new_user("Ann", "ann@x.com")).unwrap();
        user.name = "Ann B".to_string();
        user.role = Role::Volunteer;
        let updated = store.update(user.clone()).unwrap();
        assert_eq!(updated.name, "Ann B");
        assert_eq!(updated.role, Role::Volunteer);
        assert!(updated.updated_at >= updated.created_at);

        assert!(store.delete(user.id).unwrap());
        assert!(!store.delete(user.id).unwrap());
        assert!(store.find_by_id(user.id).is_none());
    }

    #[test]
    fn test_update_missing_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("users.json")).unwrap();

        let user = store.insert(new_user("Ann", "ann@x.com")).unwrap();
        store.delete(user.id).unwrap();
        assert!(matches!(store.update(user), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let user = {
            let store = JsonStore::open(&path).unwrap();
            store.insert(new_user("Ann", "ann@x.com")).unwrap()
        };

        let store = JsonStore::open(&path).unwrap();
        let reloaded = store.find_by_id(user.id).unwrap();
        assert_eq!(reloaded.email, "ann@x.com");
        assert_eq!(reloaded.password_hash, user.password_hash);
        assert_eq!(reloaded.created_at, user.created_at);
    }

    #[test]
    fn test_corrupt_file_recovers_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert!(!store.has_users());

        // And the store is usable afterwards
        store.insert(new_user("Ann", "ann@x.com")).unwrap();
        assert!(store.has_users());
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let store = JsonStore::open(&path).unwrap();
        store.insert(new_user("Ann", "ann@x.com")).unwrap();

        // Append a bogus record alongside the valid one
        let content = std::fs::read_to_string(&path).unwrap();
        let mut file: serde_json::Value = serde_json::from_str(&content).unwrap();
        file["users"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({"id": "not-a-uuid"}));
        std::fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_list_ordered_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("users.json")).unwrap();

        store.insert(new_user("Zoe", "zoe@x.com")).unwrap();
        store.insert(new_user("Ann", "ann@x.com")).unwrap();
        store.insert(new_user("Mia", "mia@x.com")).unwrap();

        let names: Vec<String> = store.list().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Ann", "Mia", "Zoe"]);
    }
}
