//! Roster User Store
//!
//! This crate provides the persistence layer for the roster user
//! registry: the user record model, the `UserStore` trait, a JSON-file
//! backed implementation, and an in-memory implementation for tests.

pub mod error;
pub mod json;
pub mod memory;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use models::{NewUser, ParseRoleError, Role, User};
pub use store::UserStore;
