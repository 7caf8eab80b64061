// src/ingest/filter.rs
use anyhow::{Context, Result};
use regex::Regex;

use crate::config::ScraperConfig;
use crate::ingest::types::{SignalRecord, SignalSource};

/// Per-source inclusion rules, compiled once from configuration.
#[derive(Debug, Clone)]
pub struct SignalFilters {
    /// Literal substring a filing title must contain (e.g. "Item 5.02").
    pub filing_item_code: String,
    /// Whole-word, case-insensitive executive-title matcher for news titles.
    pub exec_titles: Regex,
}

impl SignalFilters {
    pub fn new<S: AsRef<str>>(filing_item_code: &str, exec_keywords: &[S]) -> Result<Self> {
        Ok(Self {
            filing_item_code: filing_item_code.to_string(),
            exec_titles: compile_exec_regex(exec_keywords)?,
        })
    }

    pub fn from_config(cfg: &ScraperConfig) -> Result<Self> {
        Self::new(&cfg.filing_item_code, &cfg.exec_keywords)
    }

    pub fn is_filing_signal(&self, title: &str) -> bool {
        title.contains(self.filing_item_code.as_str())
    }

    pub fn is_news_signal(&self, title: &str) -> bool {
        self.exec_titles.is_match(title)
    }

    pub fn keep(&self, rec: &SignalRecord) -> bool {
        match rec.source {
            SignalSource::SecFilings => self.is_filing_signal(&rec.title),
            SignalSource::GoogleNews => self.is_news_signal(&rec.title),
        }
    }
}

/// `\b(CEO|CFO|...)\b`, case-insensitive. Keywords are matched literally.
pub fn compile_exec_regex<S: AsRef<str>>(keywords: &[S]) -> Result<Regex> {
    let alts: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    anyhow::ensure!(!alts.is_empty(), "no executive keywords configured");
    let pattern = format!(r"(?i)\b(?:{})\b", alts.join("|"));
    Regex::new(&pattern).with_context(|| format!("compiling exec regex {pattern}"))
}
