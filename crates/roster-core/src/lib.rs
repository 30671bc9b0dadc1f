//! Roster Core
//!
//! The authentication and authorization gateway: orchestrates the user
//! store, password hasher, token service, and permission model behind a
//! transport-free API.

pub mod error;
pub mod service;
pub mod validate;

pub use error::AuthError;
pub use service::{
    AuthService, AuthUser, Profile, ProfileUpdate, RefreshedSession, Registration, SessionTokens,
};
