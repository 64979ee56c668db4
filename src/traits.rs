use async_trait::async_trait;

use crate::{
    documents::{Game, GamePrices},
    library::{Identity, PageCursor, WishlistPage},
    Status,
};

/// Paginated access to a user's wishlist references.
#[async_trait]
pub trait WishlistStore: Send + Sync {
    /// Returns the page that follows `after`, or the first page when `after`
    /// is None. Fails with `Status::NotAuthenticated` without an `identity`.
    async fn fetch_page(
        &self,
        identity: Option<&Identity>,
        after: Option<&PageCursor>,
    ) -> Result<WishlistPage, Status>;
}

/// Game metadata and price lookups.
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn get_game(&self, id: &str) -> Result<Game, Status>;

    async fn get_prices(&self, ids: &[String]) -> Result<Vec<GamePrices>, Status>;
}
