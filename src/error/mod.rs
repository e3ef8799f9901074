//! Unified error handling
//!
//! Every component returns a typed `AppError` up to the pipeline boundary.
//! `IntoResponse` is the only place a user-facing message and HTTP status are
//! rendered; internal detail is logged server-side and never exposed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing, malformed, expired or tampered credentials (token or
    /// service signature). Deliberately carries no detail.
    #[error("unauthorized")]
    Unauthorized,

    #[error("too many requests")]
    TooManyRequests,

    /// Bad username or password at login. Never distinguishes "no such
    /// user" from "wrong password" to avoid user enumeration.
    #[error("invalid username or password")]
    CredentialInvalid,

    #[error("username already exists")]
    UsernameExists,

    #[error("email already exists")]
    EmailExists,

    #[error("password does not match confirmation")]
    PasswordMismatch,

    #[error("user not found")]
    NotFound,

    #[error("validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::error(self.to_string()),
            ),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                ApiResponse::error(self.to_string()),
            ),
            AppError::CredentialInvalid
            | AppError::UsernameExists
            | AppError::EmailExists
            | AppError::PasswordMismatch
            | AppError::NotFound => {
                (StatusCode::BAD_REQUEST, ApiResponse::error(self.to_string()))
            }
            AppError::Validation(errors) => {
                let details = serde_json::to_value(errors).unwrap_or_default();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ApiResponse::error_with_data("Unprocessable Entity".to_string(), details),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("internal server error".to_string()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("internal server error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
