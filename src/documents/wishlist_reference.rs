use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document type under 'users/{user_id}/wishlist/{game_id}' that records a
/// game saved by the user. Documents are created when a game is wishlisted and
/// deleted when it is removed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WishlistReference {
    #[serde(rename = "userID")]
    pub user_id: String,

    #[serde(rename = "gameID")]
    pub game_id: String,

    #[serde(rename = "createdAt")]
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl WishlistReference {
    pub fn new(user_id: &str, game_id: &str) -> Self {
        WishlistReference {
            user_id: String::from(user_id),
            game_id: String::from(game_id),
            created_at: Utc::now(),
        }
    }
}
