use serde::{Deserialize, Serialize};

use super::{Deal, Game, GamePrices};

/// Display ready wishlist row: a wishlisted game joined with its cheapest
/// current deal. Recomputed on every load and never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WishlistItem {
    pub user_id: String,
    pub game_id: String,
    pub title: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,

    pub deal: Deal,
}

impl WishlistItem {
    /// Joins `game` with the cheapest deal in `prices`. Returns None when no
    /// deals are available for the game.
    pub fn join(user_id: &str, game: &Game, prices: &GamePrices) -> Option<Self> {
        let deal = prices.cheapest_deal()?;
        Some(WishlistItem {
            user_id: String::from(user_id),
            game_id: game.id.clone(),
            title: game.title.clone(),
            regular_price: Some(deal.regular.amount),
            poster_url: game.poster_url().map(String::from),
            deal: deal.clone(),
        })
    }
}
