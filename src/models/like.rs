use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the 'likes' table. Primary key is `(user_id, message_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Like {
    pub user_id: i64,
    pub message_id: i64,
}
