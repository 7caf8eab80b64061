// src/ingest/providers/mod.rs
pub mod google_news;
pub mod sec_edgar;

use crate::config::ScraperConfig;
use crate::ingest::error::FeedError;

/// Both feeds advertise compressed transfer; reqwest decodes transparently.
pub const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate";

/// HTTP client carrying the run's timeout and identifying user agent.
pub fn build_client(cfg: &ScraperConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(cfg.timeout())
        .user_agent(cfg.user_agent.as_str())
        .build()
}

/// Send `req` and return the body text of a 2xx response.
pub(crate) async fn fetch_text(req: reqwest::RequestBuilder, url: &str) -> Result<String, FeedError> {
    let resp = req.send().await.map_err(|source| FeedError::Network {
        url: url.to_string(),
        source,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status,
        });
    }

    resp.text().await.map_err(|source| FeedError::Network {
        url: url.to_string(),
        source,
    })
}
