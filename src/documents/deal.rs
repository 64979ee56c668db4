use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// A shop specific price offer for a game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub shop: ShopAbridged,
    pub price: Cost,
    pub regular: Cost,

    /// Discount percentage, e.g. 22 for a 22% cut.
    pub cut: u32,

    /// Coupon code.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_low: Option<Cost>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_low: Option<Cost>,

    #[serde(default, deserialize_with = "lenient_vec")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drm: Vec<Drm>,

    #[serde(default, deserialize_with = "lenient_vec")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<Platform>,

    pub timestamp: String,

    #[serde(default, deserialize_with = "lenient_datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,

    /// Link to the deal on the shop's storefront.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cost {
    pub amount: f64,
    pub amount_int: i64,
    pub currency: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShopAbridged {
    pub id: u64,
    pub name: String,
}

/// Digital rights management, e.g. Steam.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Drm {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Platform {
    pub id: u64,
    pub name: String,
}

/// Row of the batched prices response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GamePrices {
    pub id: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_low: Option<HistoryLow>,

    #[serde(default)]
    pub deals: Vec<Deal>,
}

impl GamePrices {
    /// Returns the deal with the lowest current price. Ties resolve to the
    /// first deal listed.
    pub fn cheapest_deal(&self) -> Option<&Deal> {
        self.deals.iter().min_by_key(|deal| deal.price.amount_int)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryLow {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Cost>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<Cost>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m3: Option<Cost>,
}

// Malformed lists decode as empty instead of failing the whole deal.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.and_then(|text| {
        DateTime::parse_from_rfc3339(&text)
            .or_else(|_| DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%z"))
            .ok()
            .map(|datetime| datetime.with_timezone(&Utc))
    }))
}
