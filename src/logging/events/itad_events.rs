use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use valuable::Valuable;

use crate::{
    documents::{Game, GamePrices},
    log_event,
    logging::LogEvent,
    Status,
};

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub enum ItadEvent {
    Game(Request),
    Prices(BatchRequest),
}

impl ItadEvent {
    pub fn game(id: &str, response: &Result<Game, Status>) {
        log_event!(LogEvent::Itad(ItadEvent::Game(Request {
            id: id.to_owned(),
            result: match response {
                Ok(game) => Response::Success(game.title.clone()),
                Err(status) => Response::Error(status.to_string()),
            },
        })))
    }

    pub fn prices(ids: &[String], response: &Result<Vec<GamePrices>, Status>) {
        log_event!(LogEvent::Itad(ItadEvent::Prices(BatchRequest {
            requested: ids.len(),
            result: match response {
                Ok(prices) => BatchResponse::Success(
                    prices.iter().map(|p| p.deals.len()).sum::<usize>(),
                ),
                Err(status) => BatchResponse::Error(status.to_string()),
            },
        })))
    }
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct Request {
    id: String,
    result: Response,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
enum Response {
    Success(String),
    Error(String),
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
pub struct BatchRequest {
    requested: usize,
    result: BatchResponse,
}

#[derive(Serialize, Deserialize, Valuable, Clone, Debug)]
enum BatchResponse {
    /// Total number of deals returned across all games.
    Success(usize),
    Error(String),
}
