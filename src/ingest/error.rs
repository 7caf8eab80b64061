// src/ingest/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Timeout, connection failure, or broken body.
    #[error("network error fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed feed xml: {0}")]
    Parse(String),
}

impl FeedError {
    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        FeedError::Parse(e.to_string())
    }
}
