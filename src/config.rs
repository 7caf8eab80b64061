// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "EXEC_SIGNALS_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/exec_signals.toml";
pub const DEFAULT_JSON_PATH: &str = "config/exec_signals.json";

pub const DEFAULT_USER_AGENT: &str =
    "Dyfal Executive Signal Bot / 1.0 (Contact: support@dyfal.ai)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEC_URL: &str =
    "https://www.sec.gov/cgi-bin/browse-edgar?action=getcurrent&type=8-K&count=100&output=atom";
pub const DEFAULT_NEWS_URL: &str = "https://news.google.com/rss/search?\
q=(appoints%20OR%20names%20OR%20hires%20OR%20search%20for)%20\
(CEO%20OR%20CFO%20OR%20COO%20OR%20CTO%20OR%20CMO)&hl=en-US&gl=US&ceid=US:en";
/// SEC Form 8-K item for departure/appointment of officers and directors.
pub const DEFAULT_FILING_ITEM_CODE: &str = "Item 5.02";
pub const DEFAULT_CSV_PATH: &str = "executive_signals.csv";
pub const DEFAULT_JSON_OUT_PATH: &str = "executive_signals.json";

pub fn default_exec_keywords() -> Vec<String> {
    [
        "CEO",
        "CFO",
        "COO",
        "CTO",
        "CMO",
        "CIO",
        "CPO",
        "CHRO",
        "President",
        "Vice President",
        "Head of",
        "Director",
        "General Manager",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_sec_url() -> String {
    DEFAULT_SEC_URL.to_string()
}
fn default_news_url() -> String {
    DEFAULT_NEWS_URL.to_string()
}
fn default_filing_item_code() -> String {
    DEFAULT_FILING_ITEM_CODE.to_string()
}
fn default_csv_path() -> PathBuf {
    PathBuf::from(DEFAULT_CSV_PATH)
}
fn default_json_path() -> PathBuf {
    PathBuf::from(DEFAULT_JSON_OUT_PATH)
}

/// Immutable run configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout, seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_sec_url")]
    pub sec_url: String,
    #[serde(default = "default_news_url")]
    pub news_url: String,
    #[serde(default = "default_filing_item_code")]
    pub filing_item_code: String,
    /// Executive titles matched as whole words, case-insensitively, in news titles.
    #[serde(default = "default_exec_keywords")]
    pub exec_keywords: Vec<String>,
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            sec_url: default_sec_url(),
            news_url: default_news_url(),
            filing_item_code: default_filing_item_code(),
            exec_keywords: default_exec_keywords(),
            csv_path: default_csv_path(),
            json_path: default_json_path(),
        }
    }
}

impl ScraperConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg: ScraperConfig = match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("parsing toml config {}", path.display()))?,
        };
        cfg.sanitized()
    }

    /// Load config using env var + fallbacks:
    /// 1) $EXEC_SIGNALS_CONFIG_PATH
    /// 2) config/exec_signals.toml
    /// 3) config/exec_signals.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from(DEFAULT_JSON_PATH);
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }

    fn sanitized(mut self) -> Result<Self> {
        self.exec_keywords = clean_list(self.exec_keywords);
        self.filing_item_code = self.filing_item_code.trim().to_string();

        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.exec_keywords.is_empty() {
            bail!("exec_keywords must contain at least one keyword");
        }
        if self.filing_item_code.is_empty() {
            bail!("filing_item_code must not be empty");
        }
        if self.csv_path.as_os_str().is_empty() || self.json_path.as_os_str().is_empty() {
            bail!("output paths must not be empty");
        }
        Ok(self)
    }
}

// Trim, drop empties and repeats; keeps first-seen order.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}
