use std::time::Instant;

use tracing::info;

use crate::Status;

use super::counters::*;

pub struct WishlistCounters;

impl WishlistCounters {
    pub fn page_fail(status: &Status) {
        error_counter(
            "wishlist_page_fail",
            "Failed to fetch wishlist page",
            status,
        )
    }

    pub fn resolve_fail(status: &Status) {
        error_counter(
            "wishlist_resolve_fail",
            "Failed to resolve wishlist deals",
            status,
        )
    }

    pub fn exhausted() {
        counter("wishlist_exhausted", "Reached the end of the wishlist")
    }
}

pub struct WishlistLoadCounter {
    start: Instant,
}

impl WishlistLoadCounter {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn log(self, references: usize, items: usize) {
        info!(
            labels.log_type = COUNTERS,
            labels.counter = "wishlist_load",
            wishlist_load.latency = self.start.elapsed().as_millis() as u64,
            wishlist_load.references = references,
            wishlist_load.items = items,
            "Wishlist page loaded: {items} items from {references} references",
        )
    }
}
