mod backend;
mod service;

pub use service::ItadApi;
