use serde::{Deserialize, Serialize};

use super::Deal;

/// A page of the current deals feed.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DealResponse {
    pub next_offset: u64,
    pub has_more: bool,

    #[serde(default)]
    pub list: Vec<DealItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DealItem {
    pub id: String,
    pub title: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default)]
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal: Option<Deal>,
}
