// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";
pub const MAX_BIO_LEN: usize = 500;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub image_url: String,
    pub header_image_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// A user together with the sizes of their derived collections.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub messages_count: i64,
    pub following_count: i64,
    pub followers_count: i64,
    pub likes_count: i64,
}

/// DTO for creating a new user (Signup).
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(
        min = 1,
        max = 30,
        message = "Username length must be between 1 and 30 characters."
    ))]
    pub username: String,
    #[validate(email(message = "A valid email is required."))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
}

impl SignupRequest {
    /// Trims the identity fields so validation sees what will be stored.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 30))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Editable profile fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(
        min = 1,
        max = 30,
        message = "Username length must be between 1 and 30 characters."
    ))]
    pub username: String,
    #[validate(email(message = "A valid email is required."))]
    pub email: String,
    #[validate(length(max = 255))]
    pub image_url: Option<String>,
    #[validate(length(max = 255))]
    pub header_image_url: Option<String>,
    /// Capped at `MAX_BIO_LEN` once markup is stripped.
    pub bio: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

impl ProfileUpdate {
    /// Trims the identity fields so validation sees what will be stored.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_string();
        self
    }
}

/// DTO for the profile edit form: the new fields plus the current password.
#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    #[serde(flatten)]
    pub fields: ProfileUpdate,
    pub password: String,
}

/// Query parameters for listing users.
#[derive(Debug, Deserialize)]
pub struct UserSearchParams {
    /// Substring of the username.
    pub q: Option<String>,
}

/// Treats a missing or blank optional field as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
