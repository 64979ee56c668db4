use serde::{Deserialize, Serialize};

/// Game info as returned by the IsThereAnyDeal `games/info` endpoint.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
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
    pub mature: bool,

    #[serde(default)]
    pub early_access: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Game {
    /// Image used as the game's poster in list rows.
    pub fn poster_url(&self) -> Option<&str> {
        self.assets.as_ref().and_then(|a| a.banner400.as_deref())
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Assets {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxart: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner145: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner300: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner400: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner600: Option<String>,
}

/// Result row of a title search.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SearchItem {
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
    pub mature: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
}
