use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::{
    documents::{Game, WishlistItem},
    logging::{WishlistCounters, WishlistLoadCounter},
    traits::WishlistStore,
    Status,
};

use super::{AuthEvent, DealAggregator, Identity, PageCursor};

/// State of a wishlist screen: who is signed in, how far the wishlist has
/// been paged and the items displayed so far.
///
/// The item list is only mutated through `&mut self`. Page loads are split in
/// `begin_load()` / `complete_load()` so the network part can run elsewhere
/// while at most one load per session is in flight.
pub struct WishlistSession {
    store: Arc<dyn WishlistStore>,
    aggregator: DealAggregator,

    identity: Option<Identity>,
    cursor: Option<PageCursor>,
    generation: u64,
    in_flight: bool,
    exhausted: bool,
    items: Vec<WishlistItem>,
}

impl WishlistSession {
    pub fn new(store: Arc<dyn WishlistStore>, aggregator: DealAggregator) -> Self {
        WishlistSession {
            store,
            aggregator,
            identity: None,
            cursor: None,
            generation: 0,
            in_flight: false,
            exhausted: false,
            items: vec![],
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Applies an authentication change. Signing in as a different user or
    /// signing out drops all loaded state.
    pub fn on_auth(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(identity) => {
                if self.identity.as_ref() != Some(&identity) {
                    info!("wishlist session signed in as '{}'", identity.user_id);
                    self.reset();
                    self.identity = Some(identity);
                }
            }
            AuthEvent::SignedOut => {
                info!("wishlist session signed out");
                self.reset();
                self.identity = None;
            }
        }
    }

    /// Drops loaded items and starts paging from the first page again.
    pub fn refresh(&mut self) {
        self.reset();
    }

    /// Abandons the load in flight. Its result will be discarded.
    pub fn cancel_load(&mut self) {
        if self.in_flight {
            self.generation += 1;
            self.in_flight = false;
        }
    }

    /// Claims the next page load. Fails when no user is signed in, a load is
    /// already in flight or all pages were loaded.
    pub fn begin_load(&mut self) -> Result<PageRequest, LoadSkipped> {
        let identity = self.identity.clone().ok_or(LoadSkipped::NotSignedIn)?;
        if self.in_flight {
            return Err(LoadSkipped::InFlight);
        }
        if self.exhausted {
            return Err(LoadSkipped::Exhausted);
        }

        self.in_flight = true;
        Ok(PageRequest {
            identity,
            cursor: self.cursor.clone(),
            generation: self.generation,
            store: Arc::clone(&self.store),
            aggregator: self.aggregator.clone(),
        })
    }

    /// Applies the result of a load claimed with `begin_load()`.
    pub fn complete_load(&mut self, page: LoadedPage) -> LoadOutcome {
        if page.generation != self.generation {
            return LoadOutcome::Discarded;
        }
        self.in_flight = false;

        match page.result {
            PageResult::StoreFailed(status) => {
                // Keep what is already displayed but stop paging until the
                // next refresh.
                self.exhausted = true;
                LoadOutcome::Failed(status)
            }
            PageResult::ResolveFailed {
                next_cursor,
                status,
            } => {
                self.advance(next_cursor);
                LoadOutcome::Failed(status)
            }
            PageResult::Resolved { next_cursor, items } => {
                let added = self.append(items);
                self.advance(next_cursor);
                LoadOutcome::Appended {
                    added,
                    exhausted: self.exhausted,
                }
            }
        }
    }

    /// Loads the next page and appends its items.
    pub async fn load_next_page(&mut self) -> Result<LoadOutcome, LoadSkipped> {
        let request = self.begin_load()?;
        let page = request.run().await;
        Ok(self.complete_load(page))
    }

    /// Adds a game the user just wishlisted to the top of the list. Returns
    /// true if the list changed.
    #[instrument(level = "trace", skip(self, game), fields(game_id = %game.id))]
    pub async fn on_game_wishlisted(&mut self, game: &Game, regular_price: Option<f64>) -> bool {
        let Some(identity) = self.identity.clone() else {
            return false;
        };
        if self.contains(&game.id) {
            return false;
        }

        match self
            .aggregator
            .resolve_game(&identity, game, regular_price)
            .await
        {
            Ok(Some(item)) => {
                self.items.insert(0, item);
                true
            }
            Ok(None) => {
                warn!("no current deals for wishlisted game '{}'", game.title);
                false
            }
            Err(status) => {
                error!("failed to resolve wishlisted game '{}': {status}", game.title);
                false
            }
        }
    }

    /// Removes a game the user just removed from the wishlist. Returns true
    /// if the list changed.
    pub fn on_game_unwishlisted(&mut self, game_id: &str) -> bool {
        let len = self.items.len();
        self.items.retain(|item| item.game_id != game_id);
        self.items.len() != len
    }

    fn contains(&self, game_id: &str) -> bool {
        self.items.iter().any(|item| item.game_id == game_id)
    }

    fn append(&mut self, items: Vec<WishlistItem>) -> usize {
        let len = self.items.len();
        for item in items {
            if !self.contains(&item.game_id) {
                self.items.push(item);
            }
        }
        self.items.len() - len
    }

    fn advance(&mut self, next_cursor: Option<PageCursor>) {
        match next_cursor {
            Some(cursor) => self.cursor = Some(cursor),
            None => {
                WishlistCounters::exhausted();
                self.exhausted = true;
            }
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.cursor = None;
        self.in_flight = false;
        self.exhausted = false;
        self.items.clear();
    }
}

/// A claimed page load. Owns everything it needs so it can be spawned.
pub struct PageRequest {
    identity: Identity,
    cursor: Option<PageCursor>,
    generation: u64,
    store: Arc<dyn WishlistStore>,
    aggregator: DealAggregator,
}

impl PageRequest {
    /// Fetches the page and resolves its games. Failures are logged and
    /// reported in the returned page, never retried.
    #[instrument(
        name = "wishlist::load_page",
        level = "trace",
        skip(self),
        fields(user_id = %self.identity.user_id, first_page = self.cursor.is_none())
    )]
    pub async fn run(self) -> LoadedPage {
        let counter = WishlistLoadCounter::new();

        let page = match self
            .store
            .fetch_page(Some(&self.identity), self.cursor.as_ref())
            .await
        {
            Ok(page) => page,
            Err(status) => {
                error!("Error loading wishlist: {status}");
                WishlistCounters::page_fail(&status);
                return LoadedPage {
                    generation: self.generation,
                    result: PageResult::StoreFailed(status),
                };
            }
        };

        let result = match self
            .aggregator
            .resolve(&self.identity, &page.game_ids())
            .await
        {
            Ok(items) => {
                counter.log(page.references.len(), items.len());
                PageResult::Resolved {
                    next_cursor: page.next_cursor,
                    items,
                }
            }
            Err(status) => {
                error!("Error getting games: {status}");
                WishlistCounters::resolve_fail(&status);
                PageResult::ResolveFailed {
                    next_cursor: page.next_cursor,
                    status,
                }
            }
        };

        LoadedPage {
            generation: self.generation,
            result,
        }
    }
}

/// Result of `PageRequest::run()`, applied with
/// `WishlistSession::complete_load()`.
pub struct LoadedPage {
    generation: u64,
    result: PageResult,
}

enum PageResult {
    StoreFailed(Status),
    ResolveFailed {
        next_cursor: Option<PageCursor>,
        status: Status,
    },
    Resolved {
        next_cursor: Option<PageCursor>,
        items: Vec<WishlistItem>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Appended { added: usize, exhausted: bool },

    /// Nothing was added. The error was already logged.
    Failed(Status),

    /// The session was reset or the load cancelled while it was in flight.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSkipped {
    NotSignedIn,
    InFlight,
    Exhausted,
}
