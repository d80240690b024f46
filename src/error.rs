// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// The user column whose unique constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Username,
    Email,
}

impl Credential {
    pub fn as_str(&self) -> &'static str {
        match self {
            Credential::Username => "Username",
            Credential::Email => "Email",
        }
    }
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (missing or malformed field)
    BadRequest(String),

    // 401 Unauthorized (not logged in, bad credentials, or not the owner)
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., concurrent duplicate like)
    Conflict(String),

    // 409 Conflict on a unique user column
    DuplicateCredential(Credential),
}

impl AppError {
    /// Maps a failed insert/update on `users`, translating unique violations
    /// into `DuplicateCredential`.
    pub fn from_user_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let credential = if db_err.message().contains("users.email") {
                    Credential::Email
                } else {
                    Credential::Username
                };
                return AppError::DuplicateCredential(credential);
            }
        }
        tracing::error!("Failed to write user: {:?}", err);
        AppError::from(err)
    }

    pub fn unauthorized() -> Self {
        AppError::AuthError("Access unauthorized.".to_string())
    }
}

/// True when the database rejected a write because of a UNIQUE or PRIMARY KEY constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DuplicateCredential(credential) => (
                StatusCode::CONFLICT,
                format!("{} already taken", credential.as_str()),
            ),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
