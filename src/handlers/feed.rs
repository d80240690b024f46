// src/handlers/feed.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError, models::message::FeedParams, services::feed, session::Session,
};

/// Home feed. Anonymous callers get an empty list.
pub async fn homepage(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Query(params): Query<FeedParams>,
) -> Result<impl IntoResponse, AppError> {
    let messages = feed::feed(&pool, &session, params.limit).await?;
    Ok(Json(messages))
}
