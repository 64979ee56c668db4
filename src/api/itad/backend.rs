use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::Status;

/// Sends a GET request to an ITAD service endpoint.
pub async fn get<T: DeserializeOwned>(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    params: &[(&str, String)],
) -> Result<T, Status> {
    let uri = format!("{ITAD_SERVICE_URL}/{endpoint}");
    let request = client.get(&uri).query(&[("key", api_key)]).query(params);
    send(request, &uri).await
}

/// Sends a POST request with a JSON `body` to an ITAD service endpoint.
pub async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    params: &[(&str, String)],
    body: &B,
) -> Result<T, Status> {
    let uri = format!("{ITAD_SERVICE_URL}/{endpoint}");
    let request = client
        .post(&uri)
        .query(&[("key", api_key)])
        .query(params)
        .json(body);
    send(request, &uri).await
}

async fn send<T: DeserializeOwned>(request: RequestBuilder, uri: &str) -> Result<T, Status> {
    let resp = request.send().await?;

    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        let msg = format!("ITAD request failed with {status}: {text}\nuri: {uri}");
        error!("{msg}");
        return Err(Status::internal(msg));
    }

    serde_json::from_str::<T>(&text).map_err(|e| {
        let msg = format!("Received unexpected response ({e}): {text}\nuri: {uri}");
        error!("{msg}");
        Status::internal(msg)
    })
}

pub const ITAD_SERVICE_URL: &str = "https://api.isthereanydeal.com";

pub const GAME_INFO_ENDPOINT: &str = "games/info/v2";
pub const GAME_PRICES_ENDPOINT: &str = "games/prices/v3";
pub const GAME_SEARCH_ENDPOINT: &str = "games/search/v1";
pub const DEALS_ENDPOINT: &str = "deals/v2";
pub const SHOPS_ENDPOINT: &str = "service/shops/v1";
pub const MOST_WAITLISTED_ENDPOINT: &str = "stats/most-waitlisted/v1";
