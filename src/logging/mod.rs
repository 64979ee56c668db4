mod counters;
mod events;
mod log_event;

pub use counters::*;
pub use events::*;
pub use log_event::*;
