// src/services/messages.rs

use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::message::{CreateMessageRequest, MAX_MESSAGE_LEN, Message},
    services::users::ensure_user,
    session::Session,
    utils::html::clean_text,
};

/// Posts a message as the session user.
pub async fn create_message(
    pool: &SqlitePool,
    session: &Session,
    form: CreateMessageRequest,
) -> Result<Message, AppError> {
    let user_id = session.require_user()?;
    form.validate()?;

    let text = clean_text(form.text.trim());
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Message text is required".to_string()));
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::BadRequest(format!(
            "Message must be between 1 and {} characters",
            MAX_MESSAGE_LEN
        )));
    }

    let message = sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (text, created_at, user_id)
        VALUES (?, ?, ?)
        RETURNING id, text, created_at, user_id
        "#,
    )
    .bind(text)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create message: {:?}", e);
        AppError::from(e)
    })?;

    Ok(message)
}

pub async fn get_message(pool: &SqlitePool, message_id: i64) -> Result<Message, AppError> {
    sqlx::query_as::<_, Message>("SELECT id, text, created_at, user_id FROM messages WHERE id = ?")
        .bind(message_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))
}

/// Messages authored by `user_id`, newest first.
pub async fn messages_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Message>, AppError> {
    let mut conn = pool.acquire().await?;
    ensure_user(&mut conn, user_id).await?;

    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, text, created_at, user_id
        FROM messages
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(messages)
}

/// Deletes a message and the likes on it.
/// Requires: Login + Author.
pub async fn delete_message(pool: &SqlitePool, session: &Session, message_id: i64) -> Result<(), AppError> {
    let user_id = session.require_user()?;

    let mut tx = pool.begin().await?;

    // 1. Fetch message to check ownership
    let author_id: i64 = sqlx::query_scalar("SELECT user_id FROM messages WHERE id = ?")
        .bind(message_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

    // 2. Check permission
    if author_id != user_id {
        return Err(AppError::AuthError(
            "You are not authorized to delete this message".to_string(),
        ));
    }

    // 3. Likes reference the message, so they go first
    sqlx::query("DELETE FROM likes WHERE message_id = ?")
        .bind(message_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM messages WHERE id = ?")
        .bind(message_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(user_id, message_id, "Message deleted");
    Ok(())
}
