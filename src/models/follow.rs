use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the 'follows' table: `user_following_id` follows `user_being_followed_id`.
///
/// The pair is the primary key, so an edge exists at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Follow {
    pub user_being_followed_id: i64,
    pub user_following_id: i64,
}

impl Follow {
    pub fn new(follower_id: i64, followee_id: i64) -> Self {
        Self {
            user_being_followed_id: followee_id,
            user_following_id: follower_id,
        }
    }
}
