use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::{
    documents::{DealResponse, Game, GamePrices, SearchItem, Shop, Stat},
    logging::{ItadEvent, ItadRequestCounter},
    traits::DealSource,
    Status,
};

use super::backend::*;

/// Client for the IsThereAnyDeal API.
#[derive(Clone)]
pub struct ItadApi {
    api_key: String,
    country: String,
    client: Client,
}

impl ItadApi {
    pub fn new(api_key: &str, country: &str) -> ItadApi {
        ItadApi {
            api_key: String::from(api_key),
            country: String::from(country),
            client: Client::new(),
        }
    }

    /// Returns game info for an ITAD game `id`.
    #[instrument(level = "trace", skip(self))]
    pub async fn game(&self, id: &str) -> Result<Game, Status> {
        let counter = ItadRequestCounter::new("itad_game");
        let response = get(
            &self.client,
            GAME_INFO_ENDPOINT,
            &self.api_key,
            &[("id", id.to_owned())],
        )
        .await;

        ItadEvent::game(id, &response);
        match &response {
            Ok(_) => counter.log(),
            Err(status) => counter.log_error(status),
        }
        response
    }

    /// Returns current deals for all `ids` in a single request. Games without
    /// any deal in the configured country may be missing from the response.
    #[instrument(level = "trace", skip(self, ids), fields(num_ids = ids.len()))]
    pub async fn prices(&self, ids: &[String]) -> Result<Vec<GamePrices>, Status> {
        let counter = ItadRequestCounter::new("itad_prices");
        let response = post(
            &self.client,
            GAME_PRICES_ENDPOINT,
            &self.api_key,
            &[("country", self.country.clone())],
            ids,
        )
        .await;

        ItadEvent::prices(ids, &response);
        match &response {
            Ok(_) => counter.log(),
            Err(status) => counter.log_error(status),
        }
        response
    }

    /// Returns a page of the current deals feed, sorted by ITAD's trending
    /// order.
    #[instrument(level = "trace", skip(self))]
    pub async fn deals(&self, offset: u64, limit: u64) -> Result<DealResponse, Status> {
        get(
            &self.client,
            DEALS_ENDPOINT,
            &self.api_key,
            &[
                ("country", self.country.clone()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
                ("sort", String::from("-trending")),
            ],
        )
        .await
    }

    /// Returns games that match `title`.
    #[instrument(level = "trace", skip(self))]
    pub async fn search(&self, title: &str) -> Result<Vec<SearchItem>, Status> {
        get(
            &self.client,
            GAME_SEARCH_ENDPOINT,
            &self.api_key,
            &[("title", title.to_owned()), ("results", String::from("20"))],
        )
        .await
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn shops(&self) -> Result<Vec<Shop>, Status> {
        get(
            &self.client,
            SHOPS_ENDPOINT,
            &self.api_key,
            &[("country", self.country.clone())],
        )
        .await
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn most_waitlisted(&self, offset: u64, limit: u64) -> Result<Vec<Stat>, Status> {
        get(
            &self.client,
            MOST_WAITLISTED_ENDPOINT,
            &self.api_key,
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Downloads the image at `url`, e.g. a game poster.
    #[instrument(level = "trace", skip(self))]
    pub async fn image(&self, url: &str) -> Result<Vec<u8>, Status> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}

#[async_trait]
impl DealSource for ItadApi {
    async fn get_game(&self, id: &str) -> Result<Game, Status> {
        self.game(id).await
    }

    async fn get_prices(&self, ids: &[String]) -> Result<Vec<GamePrices>, Status> {
        self.prices(ids).await
    }
}
