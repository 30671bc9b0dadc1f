//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::AuthError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Auth(e) => {
                let (status, code) = match e {
                    AuthError::InvalidCredentials => {
                        (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
                    }
                    AuthError::DuplicateEmail => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
                    AuthError::MalformedToken => (StatusCode::UNAUTHORIZED, "MALFORMED_TOKEN"),
                    AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
                    AuthError::WrongTokenKind => (StatusCode::UNAUTHORIZED, "WRONG_TOKEN_KIND"),
                    AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                    AuthError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                    AuthError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
                    AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                    AuthError::PasswordHash(_)
                    | AuthError::TokenSigning(_)
                    | AuthError::Store(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                    }
                };
                (status, code, e.to_string())
            }
        };

        let body = axum::Json(json!({
            "code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
