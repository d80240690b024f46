// src/handlers/messages.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::message::CreateMessageRequest,
    services::{graph, messages},
    session::Session,
};

/// Posts a new message as the current user.
pub async fn add_message(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Json(payload): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let message = messages::create_message(&pool, &session, payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

pub async fn show_message(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;

    let message = messages::get_message(&pool, message_id).await?;
    Ok(Json(message))
}

/// Deletes a message. Only its author may do so.
pub async fn delete_message(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    messages::delete_message(&pool, &session, message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle Like on a message.
pub async fn toggle_like(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(message_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let liked = graph::toggle_like(&pool, &session, message_id).await?;
    Ok(Json(serde_json::json!({ "liked": liked })))
}
