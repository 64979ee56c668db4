use std::fmt::Display;

use firestore::errors::FirestoreError;

use crate::Status;

/// Maps a Firestore failure on the wishlist path into a transient store
/// error. Missing documents and bad parameters keep their own status.
pub fn make_status<S: Into<String> + Display>(
    error: FirestoreError,
    collection: &str,
    doc_id: S,
) -> Status {
    match error {
        FirestoreError::DataNotFoundError(e) => Status::not_found(format!(
            "Firestore '{collection}/{doc_id}' was not found: {e}"
        )),
        FirestoreError::InvalidParametersError(e) => Status::invalid_argument(format!(
            "Firestore '{collection}/{doc_id}' invalid parameters: {e}"
        )),
        FirestoreError::DeserializeError(e) => Status::internal(format!(
            "Firestore '{collection}/{doc_id}' document failed to parse with error '{}'",
            e.message,
        )),
        e => Status::transient_store(format!("Firestore '{collection}/{doc_id}' error: {e}")),
    }
}

pub const USERS: &str = "users";
