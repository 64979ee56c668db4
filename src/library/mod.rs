pub mod firestore;

mod aggregator;
mod identity;
mod image_slots;
mod page;
mod session;

#[cfg(test)]
mod fakes;

pub use aggregator::DealAggregator;
pub use identity::{AuthEvent, Identity};
pub use image_slots::ImageSlots;
pub use page::{PageCursor, WishlistPage, PAGE_SIZE};
pub use session::{LoadOutcome, LoadSkipped, LoadedPage, PageRequest, WishlistSession};
