// src/ingest/providers/sec_edgar.rs
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT_ENCODING, HOST};

use crate::config::ScraperConfig;
use crate::ingest::parse::parse_feed;
use crate::ingest::providers::{build_client, fetch_text, ACCEPT_ENCODING_VALUE};
use crate::ingest::types::{SignalRecord, SignalSource, SourceProvider};

const SEC_HOST: &str = "www.sec.gov";

/// Current 8-K filings from EDGAR (Atom). Yields every entry; the
/// "Item 5.02" narrowing happens in the pipeline filter.
pub struct SecEdgarProvider {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl SecEdgarProvider {
    pub fn from_fixture(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    pub fn from_config(cfg: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            mode: Mode::Http {
                url: cfg.sec_url.clone(),
                client: build_client(cfg)?,
            },
        })
    }
}

#[async_trait]
impl SourceProvider for SecEdgarProvider {
    async fn fetch_latest(&self) -> Result<Vec<SignalRecord>> {
        match &self.mode {
            Mode::Fixture(s) => Ok(parse_feed(s, SignalSource::SecFilings)?),
            Mode::Http { url, client } => {
                let req = client
                    .get(url.as_str())
                    .header(ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE)
                    .header(HOST, SEC_HOST);
                let body = fetch_text(req, url).await?;
                tracing::debug!(target: "ingest", provider = "SEC", bytes = body.len(), "fetched");
                Ok(parse_feed(&body, SignalSource::SecFilings)?)
            }
        }
    }

    fn name(&self) -> &'static str {
        "SEC"
    }

    fn source(&self) -> SignalSource {
        SignalSource::SecFilings
    }
}
