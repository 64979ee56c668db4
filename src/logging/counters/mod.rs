mod counters;
mod itad_counters;
mod wishlist_counters;

pub use itad_counters::*;
pub use wishlist_counters::*;
