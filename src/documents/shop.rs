use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Shop {
    pub id: u64,
    pub title: String,

    /// Number of currently active deals.
    #[serde(default)]
    pub deals: u64,

    /// Number of games tracked in the shop.
    #[serde(default)]
    pub games: u64,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_shops() {
        let shops: Vec<Shop> = serde_json::from_str(
            r#"[
                {"id": 35, "title": "GOG", "deals": 1532, "games": 8211, "update": "2024-06-25T10:00:12+02:00"},
                {"id": 61, "title": "Steam", "deals": 12044, "games": 98213}
            ]"#,
        )
        .unwrap();

        assert_eq!(shops.len(), 2);
        assert_eq!(shops[1].title, "Steam");
        assert_eq!(shops[1].update, None);
    }
}
