// src/services/users.rs

use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::AppError,
    models::user::{User, UserProfile},
};

pub(crate) const USER_COLUMNS: &str =
    "id, username, email, password, image_url, header_image_url, bio, location";

pub async fn user_exists(pool: &SqlitePool, user_id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Fails with `NotFound` unless the user exists.
pub(crate) async fn ensure_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), AppError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(conn)
        .await?;
    found
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Exact, case-sensitive username lookup.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Lists users, optionally narrowed to usernames containing `search`.
pub async fn list_users(pool: &SqlitePool, search: Option<&str>) -> Result<Vec<User>, AppError> {
    let pattern = search
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", q));

    let users = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE (? IS NULL OR username LIKE ?)
        ORDER BY username
        "#
    ))
    .bind(pattern.as_deref())
    .bind(pattern.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Loads a user with counts of messages, following, followers and likes.
pub async fn profile(pool: &SqlitePool, user_id: i64) -> Result<UserProfile, AppError> {
    let user = get_user(pool, user_id).await?;

    let (messages_count, following_count, followers_count, likes_count): (i64, i64, i64, i64) =
        sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM messages WHERE user_id = ?),
                (SELECT COUNT(*) FROM follows WHERE user_following_id = ?),
                (SELECT COUNT(*) FROM follows WHERE user_being_followed_id = ?),
                (SELECT COUNT(*) FROM likes WHERE user_id = ?)
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(UserProfile {
        user,
        messages_count,
        following_count,
        followers_count,
        likes_count,
    })
}
