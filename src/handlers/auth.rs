// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, SignupRequest},
    services::auth as auth_service,
    session::Session,
    utils::jwt::sign_jwt,
};

/// Registers a new user and logs them in.
///
/// Returns 201 Created with a token and the user object (excluding password).
/// A taken username or email yields 409.
pub async fn signup(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth_service::signup(&pool, payload).await?;

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "type": "Bearer",
            "user": user
        })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown usernames and wrong passwords get the same 401.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = auth_service::authenticate(&pool, &payload.username, &payload.password)
        .await?
        .ok_or(AppError::AuthError("Invalid credentials.".to_string()))?;

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": user
    })))
}

/// Ends the current session.
///
/// Tokens are stateless, so the client drops its token; the server only
/// checks that the caller was logged in. Returns 204 No Content.
pub async fn logout(Extension(session): Extension<Session>) -> Result<StatusCode, AppError> {
    let user_id = session.require_user()?;

    tracing::info!(user_id, "User logged out");

    Ok(StatusCode::NO_CONTENT)
}
