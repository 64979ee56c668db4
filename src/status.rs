use reqwest;
use serde::{Deserialize, Serialize};
use serde_json;
use std::{error::Error, fmt};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Status {
    Internal(String),
    InvalidArgument(String),
    NotFound(String),

    NotAuthenticated(String),
    TransientStore(String),
    MetadataFetch(String),
    PriceFetch(String),
}

impl Status {
    pub fn new(msg: &str, err: impl Error) -> Self {
        Status::Internal(format!("{msg}: '{err}'"))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Status::Internal(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Status::NotFound(msg.into())
    }

    pub fn not_authenticated(msg: impl Into<String>) -> Self {
        Status::NotAuthenticated(msg.into())
    }

    pub fn transient_store(msg: impl Into<String>) -> Self {
        Status::TransientStore(msg.into())
    }

    pub fn metadata_fetch(msg: impl Into<String>) -> Self {
        Status::MetadataFetch(msg.into())
    }

    pub fn price_fetch(msg: impl Into<String>) -> Self {
        Status::PriceFetch(msg.into())
    }
}

impl From<std::io::Error> for Status {
    fn from(err: std::io::Error) -> Self {
        Self::new("IO error", err)
    }
}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Self::new("serde error", err)
    }
}

impl From<reqwest::Error> for Status {
    fn from(err: reqwest::Error) -> Self {
        Self::new("reqwest error", err)
    }
}

impl From<tokio::task::JoinError> for Status {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new("task join error", err)
    }
}

use firestore::errors::FirestoreError;
impl From<FirestoreError> for Status {
    fn from(err: FirestoreError) -> Self {
        match err {
            FirestoreError::DataNotFoundError(err) => Self::not_found(err.to_string()),
            FirestoreError::InvalidParametersError(err) => Self::invalid_argument(err.to_string()),
            err => Self::new("firestore error", err),
        }
    }
}

impl Error for Status {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Internal(msg) => write!(f, "Internal error: {msg}"),
            Status::InvalidArgument(msg) => write!(f, "Invalid argument error: {msg}"),
            Status::NotFound(msg) => write!(f, "Not found error: {msg}"),
            Status::NotAuthenticated(msg) => write!(f, "Not authenticated error: {msg}"),
            Status::TransientStore(msg) => write!(f, "Transient store error: {msg}"),
            Status::MetadataFetch(msg) => write!(f, "Metadata fetch error: {msg}"),
            Status::PriceFetch(msg) => write!(f, "Price fetch error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        assert_eq!(
            Status::metadata_fetch("game 'B'").to_string(),
            "Metadata fetch error: game 'B'"
        );
        assert_eq!(
            Status::not_authenticated("no user").to_string(),
            "Not authenticated error: no user"
        );
    }

    #[test]
    fn every_status_is_an_error_kind() {
        let status: Status =
            serde_json::from_str(r#"{"PriceFetch":"prices unavailable"}"#).unwrap();
        assert_eq!(status, Status::price_fetch("prices unavailable"));
        assert!(serde_json::from_str::<Status>(r#""Ok""#).is_err());
    }

    #[test]
    fn io_error_becomes_internal() {
        let status = Status::from(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(matches!(status, Status::Internal(msg) if msg.contains("boom")));
    }
}
