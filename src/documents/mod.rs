mod deal;
mod deal_feed;
mod game;
mod shop;
mod stat;
mod wishlist_item;
mod wishlist_reference;

pub use deal::*;
pub use deal_feed::*;
pub use game::*;
pub use shop::*;
pub use stat::*;
pub use wishlist_item::*;
pub use wishlist_reference::*;
