//! Auth gateway
//!
//! Orchestrates login, registration, token refresh, and per-request
//! authorization checks over an injected user store.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use roster_auth::{
    hash_password, has_any, verify_password, Claims, Permission, TokenKind, TokenService,
    DUMMY_PASSWORD_HASH,
};
use roster_store::{NewUser, Role, StoreError, User, UserStore};

use crate::error::AuthError;

/// Sanitized user profile, safe to serialize outward
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Tokens and profile returned by login and registration
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: Profile,
}

/// New access token returned by refresh
///
/// The refresh token comes back unchanged; refresh tokens are not
/// rotated on use.
#[derive(Debug, Clone)]
pub struct RefreshedSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Registration input, role already parsed at the boundary
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: Option<Role>,
}

/// Profile update input (for partial updates)
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<Option<String>>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

/// Authenticated principal decoded from an access token
///
/// An unrecognized role claim decodes to `None`, which carries no
/// permissions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl AuthUser {
    fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::MalformedToken)?;
        Ok(Self {
            id,
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role.as_deref().and_then(|r| r.parse().ok()),
        })
    }
}

/// The auth gateway
///
/// Holds the injected store and token service. Token work is pure; the
/// only internal lock serializes read-modify-write profile updates and
/// is never held across password hashing.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
    update_lock: Mutex<()>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self {
            store,
            tokens,
            update_lock: Mutex::new(()),
        }
    }

    /// Authenticate an email/password pair and issue a token pair
    ///
    /// Unknown email and wrong password fail identically, and both
    /// paths pay for a hash verification.
    pub fn login(&self, email: &str, password: &str) -> Result<SessionTokens, AuthError> {
        let email = crate::validate::sanitize_email(email);
        debug!("Login attempt for {}", email);

        let found = self.store.find_by_email(&email);
        let (hash, found) = match found {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (DUMMY_PASSWORD_HASH.to_string(), None),
        };

        let password_valid = verify_password(password, &hash);
        let user = match (found, password_valid) {
            (Some(user), true) => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let access_token = self.tokens.issue_access_token(&user)?;
        let refresh_token = self.tokens.issue_refresh_token(&user)?;

        info!("User {} logged in", user.email);

        Ok(SessionTokens {
            access_token,
            refresh_token,
            expires_in: self.tokens.access_ttl_seconds(),
            user: Profile::from(user),
        })
    }

    /// Create a user record without starting a session
    pub fn create_user(&self, registration: Registration) -> Result<Profile, AuthError> {
        let email = crate::validate::sanitize_email(&registration.email);

        // Hash before touching the store, so the slow work happens
        // outside its lock
        let password_hash = hash_password(&registration.password)?;

        let user = self
            .store
            .insert(NewUser {
                name: registration.name,
                email,
                phone: registration.phone,
                role: registration.role.unwrap_or_default(),
                password_hash,
            })
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AuthError::DuplicateEmail,
                other => AuthError::Store(other),
            })?;

        info!("Created user {}", user.email);
        Ok(Profile::from(user))
    }

    /// Create a user, then log in with the same credentials
    ///
    /// If token issuance fails after the insert, the user record
    /// remains; registration is not rolled back.
    pub fn register(&self, registration: Registration) -> Result<SessionTokens, AuthError> {
        let password = registration.password.clone();
        let profile = self.create_user(registration)?;
        self.login(&profile.email, &password)
    }

    /// Mint a new access token from a refresh token
    ///
    /// The user is re-fetched so the new access token carries the
    /// current stored role, not the role at refresh-token issuance.
    pub fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession, AuthError> {
        let claims = self.tokens.verify(refresh_token, TokenKind::Refresh)?;
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::MalformedToken)?;

        let user = self.store.find_by_id(id).ok_or(AuthError::UserNotFound)?;
        let access_token = self.tokens.issue_access_token(&user)?;

        debug!("Refreshed access token for {}", user.email);

        Ok(RefreshedSession {
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in: self.tokens.access_ttl_seconds(),
        })
    }

    /// Verify a bearer token and return the authenticated principal
    pub fn authenticate(&self, bearer: Option<&str>) -> Result<AuthUser, AuthError> {
        let token = bearer.ok_or(AuthError::Unauthorized)?;
        let claims = self.tokens.verify(token, TokenKind::Access)?;
        AuthUser::from_claims(&claims)
    }

    /// Verify a bearer token and check the required permission set
    ///
    /// Missing or invalid tokens deny as unauthorized; a valid token
    /// whose role holds none of the required permissions denies as
    /// forbidden. An empty requirement only needs authentication.
    pub fn authorize(
        &self,
        bearer: Option<&str>,
        required: &[Permission],
    ) -> Result<AuthUser, AuthError> {
        let user = self.authenticate(bearer).map_err(|e| match e {
            e @ (AuthError::ExpiredToken | AuthError::Unauthorized) => e,
            _ => AuthError::Unauthorized,
        })?;
        self.require_any(&user, required)?;
        Ok(user)
    }

    /// Check that a principal holds at least one required permission
    pub fn require_any(&self, user: &AuthUser, required: &[Permission]) -> Result<(), AuthError> {
        if required.is_empty() || has_any(user.role, required) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Fetch a user profile
    pub fn get_user(&self, id: Uuid) -> Result<Profile, AuthError> {
        self.store
            .find_by_id(id)
            .map(Profile::from)
            .ok_or(AuthError::UserNotFound)
    }

    /// List all user profiles
    pub fn list_users(&self) -> Vec<Profile> {
        self.store.list().into_iter().map(Profile::from).collect()
    }

    /// Apply a partial profile update
    ///
    /// Password hashing happens before the update lock is taken, so
    /// concurrent updates serialize only around the record swap.
    pub fn update_user(&self, id: Uuid, update: ProfileUpdate) -> Result<Profile, AuthError> {
        let password_hash = match &update.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let _guard = self.update_lock.lock();

        let mut user = self.store.find_by_id(id).ok_or(AuthError::UserNotFound)?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(hash) = password_hash {
            user.password_hash = hash;
        }

        let updated = self.store.update(user).map_err(|e| match e {
            StoreError::NotFound(_) => AuthError::UserNotFound,
            other => AuthError::Store(other),
        })?;

        info!("Updated user {}", updated.email);
        Ok(Profile::from(updated))
    }

    /// Delete a user
    pub fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
        if self.store.delete(id)? {
            info!("Deleted user {}", id);
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}
