use chrono::{DateTime, Utc};

use crate::documents::WishlistReference;

/// Number of wishlist references fetched per page.
pub const PAGE_SIZE: u32 = 20;

/// Continuation point of a wishlist query: the ordering key of the last
/// document of the previous page, whether it decoded or not.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    pub(crate) created_at: DateTime<Utc>,

    /// Id of the wishlist document, which is also its game id.
    pub(crate) document_id: String,
}

impl PageCursor {
    pub(crate) fn new(created_at: DateTime<Utc>, document_id: impl Into<String>) -> Self {
        PageCursor {
            created_at,
            document_id: document_id.into(),
        }
    }

    pub fn after(reference: &WishlistReference) -> Self {
        PageCursor::new(reference.created_at, reference.game_id.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct WishlistPage {
    /// References ordered by creation time, newest first.
    pub references: Vec<WishlistReference>,

    /// Cursor for the next page. None when the wishlist has no more pages.
    pub next_cursor: Option<PageCursor>,
}

impl WishlistPage {
    pub fn game_ids(&self) -> Vec<String> {
        self.references.iter().map(|r| r.game_id.clone()).collect()
    }
}
