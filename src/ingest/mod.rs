// src/ingest/mod.rs
pub mod error;
pub mod filter;
pub mod parse;
pub mod providers;
pub mod types;

use crate::ingest::filter::SignalFilters;
use crate::ingest::types::{SignalRecord, SourceProvider};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

/// One-time metrics registration (so series show up once a recorder is installed).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_events_total", "Total records parsed from feeds.");
        describe_counter!(
            "ingest_kept_total",
            "Records kept after filtering + deduplication."
        );
        describe_counter!(
            "ingest_filtered_total",
            "Records dropped by the per-source signal filter."
        );
        describe_counter!(
            "ingest_dedup_total",
            "Records dropped as duplicates (or with no usable key)."
        );
        describe_counter!(
            "ingest_provider_errors_total",
            "Provider fetch/parse errors."
        );
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "ingest_pipeline_last_run_ts",
            "Unix ts when ingest pipeline last ran."
        );
    });
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub kept: Vec<SignalRecord>,
    /// Records parsed across all providers, before filtering.
    pub fetched: usize,
    pub filtered: usize,
    pub deduped: usize,
    pub failed_providers: Vec<&'static str>,
}

/// Keep the records that pass their source's filter, in order.
/// Returns (kept, filtered_out_count).
pub fn filter_signals(
    raw: Vec<SignalRecord>,
    filters: &SignalFilters,
) -> (Vec<SignalRecord>, usize) {
    let before = raw.len();
    let kept: Vec<SignalRecord> = raw.into_iter().filter(|r| filters.keep(r)).collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Order-preserving dedup keyed by url, falling back to title when url is empty.
/// Records with neither url nor title are dropped.
/// Returns (kept, dropped_count).
pub fn dedup_signals(records: Vec<SignalRecord>) -> (Vec<SignalRecord>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut keep = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for rec in records {
        let key = rec.dedup_key();
        if key.is_empty() || !seen.insert(key.to_string()) {
            dropped += 1;
            continue;
        }
        keep.push(rec);
    }

    (keep, dropped)
}

/// Run ingest once: fetch each provider in order, filter per source, merge
/// and dedupe. A failing provider is logged and contributes nothing.
pub async fn run_once(providers: &[Box<dyn SourceProvider>], filters: &SignalFilters) -> RunReport {
    ensure_metrics_described();

    let mut report = RunReport::default();
    let mut merged = Vec::new();

    for p in providers {
        match p.fetch_latest().await {
            Ok(raw) => {
                let fetched = raw.len();
                let (mut kept, filtered) = filter_signals(raw, filters);
                tracing::info!(
                    target: "ingest",
                    provider = p.name(),
                    source = %p.source(),
                    fetched,
                    kept = kept.len(),
                    "provider done"
                );
                report.fetched += fetched;
                report.filtered += filtered;
                merged.append(&mut kept);
            }
            Err(e) => {
                tracing::warn!(target: "ingest", error = ?e, provider = p.name(), "provider skipped");
                counter!("ingest_provider_errors_total").increment(1);
                report.failed_providers.push(p.name());
            }
        }
    }

    let (kept, deduped) = dedup_signals(merged);
    report.kept = kept;
    report.deduped = deduped;

    // Telemetry
    let now = chrono::Utc::now().timestamp().max(0) as u64;
    counter!("ingest_kept_total").increment(report.kept.len() as u64);
    counter!("ingest_filtered_total").increment(report.filtered as u64);
    counter!("ingest_dedup_total").increment(report.deduped as u64);
    gauge!("ingest_pipeline_last_run_ts").set(now as f64);

    report
}
