//! Roster REST API
//!
//! This crate provides the Axum-based HTTP surface for the roster user
//! registry: authentication endpoints, user management, and permission
//! introspection. All authorization decisions are delegated to the
//! gateway in `roster-core`.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
