// src/services/auth.rs

use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{DEFAULT_HEADER_IMAGE_URL, DEFAULT_IMAGE_URL, SignupRequest, User, non_blank},
    services::users::{USER_COLUMNS, find_by_username},
    utils::hash::{hash_password, verify_password},
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it. A taken username or
/// email fails with `AppError::DuplicateCredential`.
pub async fn signup(pool: &SqlitePool, form: SignupRequest) -> Result<User, AppError> {
    let form = form.normalized();
    form.validate()?;

    let hashed_password = hash_password(&form.password)?;
    let image_url = non_blank(form.image_url).unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (username, email, password, image_url, header_image_url)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&form.username)
    .bind(&form.email)
    .bind(&hashed_password)
    .bind(&image_url)
    .bind(DEFAULT_HEADER_IMAGE_URL)
    .fetch_one(pool)
    .await
    .map_err(AppError::from_user_write)?;

    tracing::info!(user_id = user.id, "New user signed up");
    Ok(user)
}

/// Checks a username/password pair.
///
/// Unknown username and wrong password both yield `None`, so callers cannot
/// tell which half was wrong.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = find_by_username(pool, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}
