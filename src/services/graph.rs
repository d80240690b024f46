// src/services/graph.rs
//
// Follow and like edges. The edge tables are keyed on the pair, so the
// storage layer rejects duplicates no matter how requests interleave.

use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    error::{AppError, is_unique_violation},
    models::{follow::Follow, like::Like, message::Message, user::User},
    services::users::ensure_user,
    session::Session,
};

/// Inserts a follow edge. Returns `false` if it already existed.
pub async fn add_follow(conn: &mut SqliteConnection, edge: &Follow) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO follows (user_being_followed_id, user_following_id)
        VALUES (?, ?)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(edge.user_being_followed_id)
    .bind(edge.user_following_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Deletes a follow edge. Returns `false` if there was none.
pub async fn remove_follow(conn: &mut SqliteConnection, edge: &Follow) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM follows WHERE user_being_followed_id = ? AND user_following_id = ?",
    )
    .bind(edge.user_being_followed_id)
    .bind(edge.user_following_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Inserts a like edge. A duplicate surfaces as a unique violation.
pub async fn add_like(conn: &mut SqliteConnection, like: &Like) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO likes (user_id, message_id) VALUES (?, ?)")
        .bind(like.user_id)
        .bind(like.message_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Deletes a like edge. Returns `false` if there was none.
pub async fn remove_like(conn: &mut SqliteConnection, like: &Like) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE user_id = ? AND message_id = ?")
        .bind(like.user_id)
        .bind(like.message_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// Makes the session user follow `target_id`.
///
/// Following someone already followed is a no-op. Following yourself is rejected.
pub async fn follow(pool: &SqlitePool, session: &Session, target_id: i64) -> Result<Follow, AppError> {
    let actor_id = session.require_user()?;

    if actor_id == target_id {
        return Err(AppError::BadRequest("You cannot follow yourself.".to_string()));
    }

    let mut tx = pool.begin().await?;
    ensure_user(&mut tx, target_id).await?;

    let edge = Follow::new(actor_id, target_id);
    let created = add_follow(&mut tx, &edge).await?;
    tx.commit().await?;

    if created {
        tracing::info!(follower = actor_id, followee = target_id, "Follow created");
    }

    Ok(edge)
}

/// Makes the session user stop following `target_id`. Missing edges are ignored.
pub async fn unfollow(pool: &SqlitePool, session: &Session, target_id: i64) -> Result<(), AppError> {
    let actor_id = session.require_user()?;

    let mut tx = pool.begin().await?;
    ensure_user(&mut tx, target_id).await?;

    let edge = Follow::new(actor_id, target_id);
    let removed = remove_follow(&mut tx, &edge).await?;
    tx.commit().await?;

    if removed {
        tracing::info!(follower = actor_id, followee = target_id, "Follow removed");
    }

    Ok(())
}

/// Likes the message, or removes the like if present. Returns whether the
/// message is liked afterwards.
///
/// Authors cannot like their own messages.
pub async fn toggle_like(pool: &SqlitePool, session: &Session, message_id: i64) -> Result<bool, AppError> {
    let user_id = session.require_user()?;

    let mut tx = pool.begin().await?;

    let author_id: i64 = sqlx::query_scalar("SELECT user_id FROM messages WHERE id = ?")
        .bind(message_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Message not found".to_string()))?;

    if author_id == user_id {
        return Err(AppError::AuthError(
            "You cannot like your own message.".to_string(),
        ));
    }

    let like = Like { user_id, message_id };

    let liked = if remove_like(&mut tx, &like).await? {
        false
    } else {
        add_like(&mut tx, &like).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Already liked".to_string())
            } else {
                AppError::from(e)
            }
        })?;
        true
    };

    tx.commit().await?;

    tracing::debug!(user_id, message_id, liked, "Like toggled");
    Ok(liked)
}

pub async fn is_following(pool: &SqlitePool, follower_id: i64, followee_id: i64) -> Result<bool, AppError> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM follows WHERE user_following_id = ? AND user_being_followed_id = ?",
    )
    .bind(follower_id)
    .bind(followee_id)
    .fetch_optional(pool)
    .await?;

    Ok(found.is_some())
}

/// Is `user_id` followed by `other_id`?
pub async fn is_followed_by(pool: &SqlitePool, user_id: i64, other_id: i64) -> Result<bool, AppError> {
    is_following(pool, other_id, user_id).await
}

/// Users that `user_id` follows.
pub async fn following(pool: &SqlitePool, user_id: i64) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password, u.image_url, u.header_image_url, u.bio, u.location
        FROM users u
        JOIN follows f ON f.user_being_followed_id = u.id
        WHERE f.user_following_id = ?
        ORDER BY u.username
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Users following `user_id`.
pub async fn followers(pool: &SqlitePool, user_id: i64) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password, u.image_url, u.header_image_url, u.bio, u.location
        FROM users u
        JOIN follows f ON f.user_following_id = u.id
        WHERE f.user_being_followed_id = ?
        ORDER BY u.username
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Messages liked by `user_id`, newest first.
pub async fn liked_messages(pool: &SqlitePool, user_id: i64) -> Result<Vec<Message>, AppError> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT m.id, m.text, m.created_at, m.user_id
        FROM messages m
        JOIN likes l ON l.message_id = m.id
        WHERE l.user_id = ?
        ORDER BY m.created_at DESC, m.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Users who liked `message_id`.
pub async fn likers(pool: &SqlitePool, message_id: i64) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password, u.image_url, u.header_image_url, u.bio, u.location
        FROM users u
        JOIN likes l ON l.user_id = u.id
        WHERE l.message_id = ?
        ORDER BY u.username
        "#,
    )
    .bind(message_id)
    .fetch_all(pool)
    .await?;

    Ok(users)
}
