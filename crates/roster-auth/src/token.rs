//! Signed session token management

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roster_store::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::TokenError;

/// Generate a fresh signing secret: 32 random bytes, hex-encoded
///
/// Callers are expected to persist the value; a secret that changes on
/// every boot invalidates all outstanding tokens.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Token kind, embedded in the claim set
///
/// A refresh token is never accepted where an access token is required,
/// and vice versa.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed token claims
///
/// Access tokens carry name and role; refresh tokens omit both so the
/// role is re-read from the store when a new access token is minted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub kind: TokenKind,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token service for issuance and verification
///
/// Owns the signing secret and algorithm choice (HS256). Issuance and
/// verification are pure and safe to call concurrently.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_minutes: i64, refresh_ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: Duration::minutes(access_ttl_minutes),
            refresh_ttl: Duration::days(refresh_ttl_days),
        }
    }

    /// Access token lifetime in seconds, for client expiry hints
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// Issue a short-lived access token for a user
    pub fn issue_access_token(&self, user: &User) -> Result<String, TokenError> {
        self.issue(user, TokenKind::Access, self.access_ttl)
    }

    /// Issue a long-lived refresh token for a user
    pub fn issue_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        self.issue(user, TokenKind::Refresh, self.refresh_ttl)
    }

    fn issue(&self, user: &User, kind: TokenKind, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let (name, role) = match kind {
            TokenKind::Access => (Some(user.name.clone()), Some(user.role.as_str().to_string())),
            TokenKind::Refresh => (None, None),
        };

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name,
            role,
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        debug!("Issuing {} token for user: {}", kind, user.email);

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify a token and return its claims
    ///
    /// Fails with `Expired` past the expiry instant (zero leeway),
    /// `Malformed` on a bad signature or missing fields, and
    /// `WrongKind` when the token kind does not match `expected`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::WrongKind);
        }

        Ok(data.claims)
    }
}
