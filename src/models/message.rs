use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Longest message, counted in characters after markup is stripped.
pub const MAX_MESSAGE_LEN: usize = 140;

/// Represents the 'messages' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Author.
    pub user_id: i64,
}

/// DTO for posting a new message.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMessageRequest {
    /// Capped at `MAX_MESSAGE_LEN` once markup is stripped.
    #[validate(length(min = 1, message = "Message text is required"))]
    pub text: String,
}

/// Query parameters for the home feed.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    /// Number of messages to return (default and max: 100).
    pub limit: Option<i64>,
}
