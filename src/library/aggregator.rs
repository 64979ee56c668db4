use itertools::Itertools;
use std::{collections::HashMap, sync::Arc};
use tokio::task::JoinSet;
use tracing::{instrument, trace_span, Instrument};

use crate::{
    documents::{Game, GamePrices, WishlistItem},
    logging::WishlistEvent,
    traits::DealSource,
    Status,
};

use super::Identity;

/// Joins wishlisted game ids with game info and their cheapest current deal.
#[derive(Clone)]
pub struct DealAggregator {
    deals: Arc<dyn DealSource>,
}

impl DealAggregator {
    pub fn new(deals: Arc<dyn DealSource>) -> Self {
        DealAggregator { deals }
    }

    /// Resolves `game_ids` into wishlist items in input order.
    ///
    /// Game info is fetched concurrently for all ids and a single failure
    /// fails the whole resolve. Games without any current deal are left out
    /// of the result. Dropping the returned future aborts all outstanding
    /// fetches.
    #[instrument(
        level = "trace",
        skip(self, identity, game_ids),
        fields(num_ids = game_ids.len())
    )]
    pub async fn resolve(
        &self,
        identity: &Identity,
        game_ids: &[String],
    ) -> Result<Vec<WishlistItem>, Status> {
        let game_ids = game_ids.iter().unique().cloned().collect_vec();
        if game_ids.is_empty() {
            return Ok(vec![]);
        }

        let games = self.fetch_games(&game_ids).await?;
        let prices = self
            .deals
            .get_prices(&game_ids)
            .await
            .map_err(|status| Status::price_fetch(status.to_string()))?;
        let prices = HashMap::<String, GamePrices>::from_iter(
            prices.into_iter().map(|prices| (prices.id.clone(), prices)),
        );

        let items = join(&identity.user_id, &game_ids, &games, &prices);
        WishlistEvent::join(game_ids.len(), items.len());
        Ok(items)
    }

    /// Resolves a single game whose info is already known, e.g. right after
    /// the user wishlisted it. `regular_price` overrides the deal's regular
    /// price when provided.
    #[instrument(level = "trace", skip(self, identity, game), fields(game_id = %game.id))]
    pub async fn resolve_game(
        &self,
        identity: &Identity,
        game: &Game,
        regular_price: Option<f64>,
    ) -> Result<Option<WishlistItem>, Status> {
        let prices = self
            .deals
            .get_prices(&[game.id.clone()])
            .await
            .map_err(|status| Status::price_fetch(status.to_string()))?;

        Ok(prices
            .iter()
            .find(|prices| prices.id == game.id)
            .and_then(|prices| WishlistItem::join(&identity.user_id, game, prices))
            .map(|mut item| {
                if regular_price.is_some() {
                    item.regular_price = regular_price;
                }
                item
            }))
    }

    async fn fetch_games(&self, game_ids: &[String]) -> Result<HashMap<String, Game>, Status> {
        let mut tasks = JoinSet::new();
        for id in game_ids {
            let deals = Arc::clone(&self.deals);
            let id = id.clone();
            tasks.spawn(
                async move {
                    let game = deals.get_game(&id).await;
                    (id, game)
                }
                .instrument(trace_span!("spawn_get_game")),
            );
        }

        // Completion order is arbitrary, results are keyed by id and ordered
        // during the join.
        let mut games = HashMap::new();
        while let Some(result) = tasks.join_next().await {
            let (id, game) = result.map_err(|e| {
                Status::metadata_fetch(format!("game lookup task failed: {e}"))
            })?;
            match game {
                Ok(game) => {
                    games.insert(id, game);
                }
                Err(status) => {
                    tasks.abort_all();
                    return Err(Status::metadata_fetch(format!("game '{id}': {status}")));
                }
            }
        }
        Ok(games)
    }
}

fn join(
    user_id: &str,
    game_ids: &[String],
    games: &HashMap<String, Game>,
    prices: &HashMap<String, GamePrices>,
) -> Vec<WishlistItem> {
    game_ids
        .iter()
        .filter_map(|id| {
            let game = games.get(id)?;
            let mut item = WishlistItem::join(user_id, game, prices.get(id)?)?;
            item.game_id = id.clone();
            Some(item)
        })
        .collect()
}
