// src/services/account.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{
        DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL, MAX_BIO_LEN, ProfileUpdate, User, non_blank,
    },
    services::{
        auth::authenticate,
        users::{USER_COLUMNS, get_user},
    },
    session::Session,
    utils::html::clean_text,
};

/// Deletes the session user and everything that references them.
///
/// Likes by the user, likes on the user's messages, the messages, follow
/// edges in both directions, then the user row, all in one transaction.
/// Consumes the session and hands back an anonymous one.
pub async fn delete_account(pool: &SqlitePool, session: Session) -> Result<Session, AppError> {
    let user_id = session.require_user()?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM likes WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM likes WHERE message_id IN (SELECT id FROM messages WHERE user_id = ?)")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM messages WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM follows WHERE user_following_id = ? OR user_being_followed_id = ?")
        .bind(user_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete user: {:?}", e);
            AppError::from(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tx.commit().await?;

    tracing::info!(user_id, "Account deleted");
    Ok(Session::anonymous())
}

/// Updates the session user's profile after re-checking their password.
pub async fn edit_profile(
    pool: &SqlitePool,
    session: &Session,
    fields: ProfileUpdate,
    current_password: &str,
) -> Result<User, AppError> {
    let user_id = session.require_user()?;
    let fields = fields.normalized();
    fields.validate()?;

    let bio = non_blank(fields.bio.clone().map(|bio| clean_text(&bio)));
    if bio.as_ref().is_some_and(|bio| bio.chars().count() > MAX_BIO_LEN) {
        return Err(AppError::BadRequest(format!(
            "Bio must be at most {} characters",
            MAX_BIO_LEN
        )));
    }

    let user = get_user(pool, user_id).await?;
    if authenticate(pool, &user.username, current_password).await?.is_none() {
        return Err(AppError::AuthError(
            "Incorrect username/password combination entered".to_string(),
        ));
    }

    let image_url = non_blank(fields.image_url).unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());
    let header_image_url =
        non_blank(fields.header_image_url).unwrap_or_else(|| DEFAULT_HEADER_IMAGE_URL.to_string());
    let location = non_blank(fields.location);

    let updated = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET username = ?, email = ?, image_url = ?, header_image_url = ?, bio = ?, location = ?
        WHERE id = ?
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&fields.username)
    .bind(&fields.email)
    .bind(&image_url)
    .bind(&header_image_url)
    .bind(bio.as_deref())
    .bind(location.as_deref())
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(AppError::from_user_write)?;

    tracing::info!(user_id, "Profile updated");
    Ok(updated)
}
