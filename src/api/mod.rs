mod firestore;
mod itad;

pub use firestore::FirestoreApi;
pub use itad::*;
