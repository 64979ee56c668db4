pub mod utils;
pub mod wishlist;
