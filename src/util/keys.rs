use serde::{Deserialize, Serialize};
use std::fs;

use crate::Status;

/// Application keys loaded from a JSON key store, e.g. `keys.json`.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Keys {
    pub itad: ItadKeys,
    pub firestore: FirestoreKeys,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct ItadKeys {
    pub api_key: String,

    /// Two-letter country code used for price lookups.
    #[serde(default = "default_country")]
    pub country: String,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct FirestoreKeys {
    pub project_id: String,
}

impl Keys {
    pub fn from_file(filename: &str) -> Result<Self, Status> {
        let text = fs::read_to_string(filename)?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self, Status> {
        let keys: Keys = serde_json::from_str(text)?;
        if keys.itad.api_key.is_empty() {
            return Err(Status::invalid_argument("key store is missing 'itad.api_key'"));
        }
        if keys.firestore.project_id.is_empty() {
            return Err(Status::invalid_argument(
                "key store is missing 'firestore.project_id'",
            ));
        }
        Ok(keys)
    }
}

fn default_country() -> String {
    String::from("US")
}
