//! Authentication error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Wrong token kind")]
    WrongKind,

    #[error("Token signing error: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing error: {0}")]
    Hash(String),
}
