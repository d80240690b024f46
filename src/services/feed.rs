// src/services/feed.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::message::Message, session::Session};

pub const FEED_LIMIT: i64 = 100;

/// Home feed: the session user's messages and those of everyone they follow,
/// newest first, at most `limit` (capped at `FEED_LIMIT`).
///
/// Anonymous sessions get an empty feed. A negative limit is rejected.
pub async fn feed(pool: &SqlitePool, session: &Session, limit: Option<i64>) -> Result<Vec<Message>, AppError> {
    let Some(user_id) = session.user_id() else {
        return Ok(Vec::new());
    };

    let limit = limit.unwrap_or(FEED_LIMIT);
    if limit < 0 {
        return Err(AppError::BadRequest("limit must not be negative".to_string()));
    }
    let limit = limit.min(FEED_LIMIT);

    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT m.id, m.text, m.created_at, m.user_id
        FROM messages m
        WHERE m.user_id = ?
           OR m.user_id IN (
                SELECT user_being_followed_id FROM follows WHERE user_following_id = ?
           )
        ORDER BY m.created_at DESC, m.id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
