mod firestore_event;
mod itad_events;
mod wishlist_events;

pub use firestore_event::*;
pub use itad_events::*;
pub use wishlist_events::*;
