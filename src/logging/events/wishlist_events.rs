use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use valuable::Valuable;

use crate::{log_event, logging::LogEvent};

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub enum WishlistEvent {
    DecodeSkipped(DecodeSkipped),
    Join(JoinStats),
}

impl WishlistEvent {
    /// A wishlist document that failed to decode and was left out of a page.
    pub fn decode_skipped(user_id: &str, error: String) {
        log_event!(LogEvent::Wishlist(WishlistEvent::DecodeSkipped(
            DecodeSkipped {
                user_id: user_id.to_owned(),
                error,
            }
        )))
    }

    pub fn join(requested: usize, resolved: usize) {
        log_event!(LogEvent::Wishlist(WishlistEvent::Join(JoinStats {
            requested,
            resolved,
            dropped: requested.saturating_sub(resolved),
        })))
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct DecodeSkipped {
    user_id: String,
    error: String,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct JoinStats {
    requested: usize,
    resolved: usize,

    /// Games without any current deal.
    dropped: usize,
}
