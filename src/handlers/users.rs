// src/handlers/users.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::user::{EditProfileRequest, UserSearchParams},
    services::{account, graph, messages, users},
    session::Session,
};

/// Lists users, optionally filtered by `?q=` on username.
pub async fn list_users(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Query(params): Query<UserSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;

    let users = users::list_users(&pool, params.q.as_deref()).await?;
    Ok(Json(users))
}

/// Shows a user profile with counts.
pub async fn show_user(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;

    let profile = users::profile(&pool, user_id).await?;
    Ok(Json(profile))
}

pub async fn show_messages(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;

    let messages = messages::messages_by_user(&pool, user_id).await?;
    Ok(Json(messages))
}

/// Users this user is following.
pub async fn show_following(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;
    users::get_user(&pool, user_id).await?;

    let following = graph::following(&pool, user_id).await?;
    Ok(Json(following))
}

/// Followers of this user.
pub async fn show_followers(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;
    users::get_user(&pool, user_id).await?;

    let followers = graph::followers(&pool, user_id).await?;
    Ok(Json(followers))
}

/// Messages this user has liked.
pub async fn show_liked_messages(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    session.require_user()?;
    users::get_user(&pool, user_id).await?;

    let liked = graph::liked_messages(&pool, user_id).await?;
    Ok(Json(liked))
}

/// Follows a user, then returns the current user's following list.
pub async fn start_following(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(follow_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let edge = graph::follow(&pool, &session, follow_id).await?;

    let following = graph::following(&pool, edge.user_following_id).await?;
    Ok(Json(following))
}

/// Stops following a user, then returns the current user's following list.
pub async fn stop_following(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Path(follow_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    graph::unfollow(&pool, &session, follow_id).await?;

    let user_id = session.require_user()?;
    let following = graph::following(&pool, user_id).await?;
    Ok(Json(following))
}

/// Updates the current user's profile. The body must carry the current password.
pub async fn edit_profile(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
    Json(payload): Json<EditProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = account::edit_profile(&pool, &session, payload.fields, &payload.password).await?;
    Ok(Json(user))
}

/// Deletes the current user along with their messages and likes.
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, AppError> {
    account::delete_account(&pool, session).await?;
    Ok(StatusCode::NO_CONTENT)
}
