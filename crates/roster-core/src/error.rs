//! Gateway error taxonomy
//!
//! Every failure here is terminal for the request. Credential and token
//! failures are never retried, and any ambiguity resolves to denial.

use roster_auth::{PasswordError, TokenError};
use roster_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Identical for unknown email and wrong password, so responses
    /// never reveal whether an email is registered
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Wrong token kind")]
    WrongTokenKind,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Authentication required")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Malformed => AuthError::MalformedToken,
            TokenError::WrongKind => AuthError::WrongTokenKind,
            TokenError::Signing(e) => AuthError::TokenSigning(e.to_string()),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        match e {
            PasswordError::Hash(msg) => AuthError::PasswordHash(msg),
        }
    }
}
