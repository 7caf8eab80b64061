// src/ingest/types.rs
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which feed a record came from. Serialized as the human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalSource {
    #[serde(rename = "SEC EDGAR 8-K 5.02")]
    SecFilings,
    #[serde(rename = "Google News")]
    GoogleNews,
}

impl SignalSource {
    pub fn label(self) -> &'static str {
        match self {
            SignalSource::SecFilings => "SEC EDGAR 8-K 5.02",
            SignalSource::GoogleNews => "Google News",
        }
    }
}

impl std::fmt::Display for SignalSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One possible executive leadership change. Empty `url`/`posted_at` mean absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalRecord {
    pub title: String,
    pub source: SignalSource,
    pub url: String,
    pub posted_at: String, // raw feed timestamp, format varies by source
}

impl SignalRecord {
    /// Uniqueness key: url if present, else title.
    pub fn dedup_key(&self) -> &str {
        if self.url.is_empty() {
            &self.title
        } else {
            &self.url
        }
    }
}

#[async_trait::async_trait]
pub trait SourceProvider {
    async fn fetch_latest(&self) -> Result<Vec<SignalRecord>>;
    fn name(&self) -> &'static str;
    fn source(&self) -> SignalSource;
}
