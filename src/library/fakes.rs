use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use crate::{
    documents::{Assets, Cost, Deal, Game, GamePrices, ShopAbridged, WishlistReference},
    traits::{DealSource, WishlistStore},
    Status,
};

use super::{Identity, PageCursor, WishlistPage, PAGE_SIZE};

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn deal(price: i64) -> Deal {
    Deal {
        shop: ShopAbridged {
            id: 61,
            name: "Steam".to_owned(),
        },
        price: Cost {
            amount: price as f64 / 100.0,
            amount_int: price,
            currency: "USD".to_owned(),
        },
        regular: Cost {
            amount: 59.99,
            amount_int: 5999,
            currency: "USD".to_owned(),
        },
        cut: (100 - price * 100 / 5999) as u32,
        voucher: None,
        store_low: None,
        history_low: None,
        drm: vec![],
        platforms: vec![],
        timestamp: "2024-06-20T17:02:09+02:00".to_owned(),
        expiry: None,
        url: None,
    }
}

/// In memory game info and price backend.
#[derive(Default)]
pub struct FakeDeals {
    games: HashMap<String, Option<Game>>,
    prices: HashMap<String, Vec<Deal>>,
    delays: HashMap<String, u64>,
    panicking: Vec<String>,
    failing_prices: bool,
    blocking: bool,

    game_calls: AtomicUsize,
    dropped: Arc<AtomicUsize>,
    requested_prices: Mutex<Vec<Vec<String>>>,
}

impl FakeDeals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, id: &str, prices: &[i64]) -> Self {
        self.games.insert(id.to_owned(), Some(game(id)));
        self.prices
            .insert(id.to_owned(), prices.iter().map(|p| deal(*p)).collect());
        self
    }

    pub fn with_game_without_prices(mut self, id: &str) -> Self {
        self.games.insert(id.to_owned(), Some(game(id)));
        self
    }

    pub fn with_failing_game(mut self, id: &str) -> Self {
        self.games.insert(id.to_owned(), None);
        self
    }

    /// Lookups of `id` panic.
    pub fn with_panicking_game(mut self, id: &str) -> Self {
        self.panicking.push(id.to_owned());
        self
    }

    pub fn with_delay(mut self, id: &str, millis: u64) -> Self {
        self.delays.insert(id.to_owned(), millis);
        self
    }

    pub fn with_failing_prices(mut self) -> Self {
        self.failing_prices = true;
        self
    }

    /// Game lookups never complete.
    pub fn blocking_games(mut self) -> Self {
        self.blocking = true;
        self
    }

    pub fn game(&self, id: &str) -> Game {
        self.games[id].clone().unwrap()
    }

    pub fn game_calls(&self) -> usize {
        self.game_calls.load(Ordering::SeqCst)
    }

    pub fn price_calls(&self) -> usize {
        self.requested_prices.lock().unwrap().len()
    }

    pub fn requested_prices(&self) -> Vec<Vec<String>> {
        self.requested_prices.lock().unwrap().clone()
    }

    pub async fn wait_for_started(&self, n: usize) {
        while self.game_calls() < n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    pub async fn wait_for_dropped(&self, n: usize) {
        while self.dropped.load(Ordering::SeqCst) < n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DealSource for FakeDeals {
    async fn get_game(&self, id: &str) -> Result<Game, Status> {
        self.game_calls.fetch_add(1, Ordering::SeqCst);
        if self.blocking {
            let _guard = DropCounter(Arc::clone(&self.dropped));
            std::future::pending::<()>().await;
        }
        if self.panicking.iter().any(|p| p == id) {
            panic!("lookup of '{id}' panicked");
        }
        if let Some(millis) = self.delays.get(id) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }

        match self.games.get(id) {
            Some(Some(game)) => Ok(game.clone()),
            Some(None) => Err(Status::internal(format!("lookup of '{id}' failed"))),
            None => Err(Status::not_found(format!("game '{id}' was not found"))),
        }
    }

    async fn get_prices(&self, ids: &[String]) -> Result<Vec<GamePrices>, Status> {
        self.requested_prices.lock().unwrap().push(ids.to_vec());
        if self.failing_prices {
            return Err(Status::internal("prices unavailable"));
        }

        Ok(ids
            .iter()
            .filter_map(|id| {
                self.prices.get(id).map(|deals| GamePrices {
                    id: id.clone(),
                    history_low: None,
                    deals: deals.clone(),
                })
            })
            .collect())
    }
}

fn game(id: &str) -> Game {
    Game {
        id: id.to_owned(),
        title: format!("Game {id}"),
        assets: Some(Assets {
            banner400: Some(format!("https://assets.example/{id}.jpg")),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// In memory wishlist ordered by creation time, newest first, then by
/// document id.
#[derive(Default)]
pub struct FakeStore {
    references: Vec<WishlistReference>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FakeStore {
    /// Creates a wishlist of `game_ids`, where the first id is the newest.
    pub fn new(user_id: &str, game_ids: &[String]) -> Self {
        let newest = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
        Self::with_references(
            game_ids
                .iter()
                .enumerate()
                .map(|(i, id)| WishlistReference {
                    user_id: user_id.to_owned(),
                    game_id: id.clone(),
                    created_at: newest - ChronoDuration::minutes(i as i64),
                })
                .collect(),
        )
    }

    pub fn with_references(mut references: Vec<WishlistReference>) -> Self {
        references.sort_by(|a, b| {
            (b.created_at, &b.game_id).cmp(&(a.created_at, &a.game_id))
        });
        FakeStore {
            references,
            ..Default::default()
        }
    }

    /// Game ids in the order the store returns them.
    pub fn game_ids(&self) -> Vec<String> {
        self.references.iter().map(|r| r.game_id.clone()).collect()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WishlistStore for FakeStore {
    async fn fetch_page(
        &self,
        identity: Option<&Identity>,
        after: Option<&PageCursor>,
    ) -> Result<WishlistPage, Status> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if identity.is_none() {
            return Err(Status::not_authenticated("no user"));
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(Status::transient_store("backend unavailable"));
        }

        let references: Vec<_> = self
            .references
            .iter()
            .filter(|r| match after {
                Some(cursor) => {
                    (r.created_at, &r.game_id) < (cursor.created_at, &cursor.document_id)
                }
                None => true,
            })
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect();

        Ok(WishlistPage {
            next_cursor: match references.len() < PAGE_SIZE as usize {
                true => None,
                false => references.last().map(PageCursor::after),
            },
            references,
        })
    }
}
