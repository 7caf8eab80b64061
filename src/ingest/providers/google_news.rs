// src/ingest/providers/google_news.rs
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT_ENCODING;

use crate::config::ScraperConfig;
use crate::ingest::parse::parse_feed;
use crate::ingest::providers::{build_client, fetch_text, ACCEPT_ENCODING_VALUE};
use crate::ingest::types::{SignalRecord, SignalSource, SourceProvider};

/// Google News RSS search for appointment headlines.
pub struct GoogleNewsProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl GoogleNewsProvider {
    pub fn from_fixture(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_config(cfg: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            mode: Mode::Http {
                url: cfg.news_url.clone(),
                client: build_client(cfg)?,
            },
        })
    }
}

#[async_trait]
impl SourceProvider for GoogleNewsProvider {
    async fn fetch_latest(&self) -> Result<Vec<SignalRecord>> {
        match &self.mode {
            Mode::Fixture(s) => Ok(parse_feed(s, SignalSource::GoogleNews)?),
            Mode::Http { url, client } => {
                let req = client
                    .get(url.as_str())
                    .header(ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE);
                let body = fetch_text(req, url).await?;
                tracing::debug!(target: "ingest", provider = "GoogleNews", bytes = body.len(), "fetched");
                Ok(parse_feed(&body, SignalSource::GoogleNews)?)
            }
        }
    }

    fn name(&self) -> &'static str {
        "GoogleNews"
    }

    fn source(&self) -> SignalSource {
        SignalSource::GoogleNews
    }
}
