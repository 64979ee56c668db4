use serde::{Deserialize, Serialize};

/// Popularity stat for a game, e.g. how many users waitlisted it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Stat {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,

    pub id: String,
    pub title: String,
    pub count: u64,
}
