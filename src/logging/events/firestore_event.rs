use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use valuable::Valuable;

use crate::{log_event, logging::LogEvent};

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct FirestoreEvent {
    op: Op,
    collection: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl FirestoreEvent {
    /// Logs a paginated query over `collection`.
    pub fn query(collection: String, read: usize, skipped: usize, errors: Vec<String>) {
        log_event!(LogEvent::Firestore(FirestoreEvent {
            op: Op::Query(QueryStats { read, skipped }),
            collection,
            doc: None,
            errors,
        }))
    }

    pub fn write(collection: String, doc: String, error: Option<String>) {
        log_event!(LogEvent::Firestore(FirestoreEvent {
            op: Op::Write,
            collection,
            doc: Some(doc),
            errors: error.into_iter().collect(),
        }))
    }

    pub fn delete(collection: String, doc: String, error: Option<String>) {
        log_event!(LogEvent::Firestore(FirestoreEvent {
            op: Op::Delete,
            collection,
            doc: Some(doc),
            errors: error.into_iter().collect(),
        }))
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
enum Op {
    Query(QueryStats),
    Write,
    Delete,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
struct QueryStats {
    read: usize,

    #[serde(skip_serializing_if = "is_zero")]
    skipped: usize,
}

fn is_zero(num: &usize) -> bool {
    *num == 0
}
