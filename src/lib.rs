// Public library surface for the binary and integration tests.

pub mod config;
pub mod ingest;
pub mod output;

// ---- Re-exports for stable public API ----
pub use crate::config::ScraperConfig;
pub use crate::ingest::types::{SignalRecord, SignalSource, SourceProvider};
pub use crate::ingest::{run_once, RunReport};
pub use crate::output::write_outputs;

use crate::ingest::filter::SignalFilters;
use crate::ingest::providers::{google_news::GoogleNewsProvider, sec_edgar::SecEdgarProvider};
use anyhow::{Context, Result};
use tracing::info;

/// Build both HTTP providers from `cfg`, run the pipeline once and write the
/// CSV/JSON snapshots. Fetch or parse failures never abort; only invalid
/// configuration or an unwritable output file does.
pub async fn run_with_config(cfg: &ScraperConfig) -> Result<RunReport> {
    let filters = SignalFilters::from_config(cfg).context("building signal filters")?;

    let providers: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(SecEdgarProvider::from_config(cfg).context("building SEC client")?),
        Box::new(GoogleNewsProvider::from_config(cfg).context("building news client")?),
    ];

    let report = run_once(&providers, &filters).await;
    write_outputs(&report.kept, &cfg.csv_path, &cfg.json_path)?;

    info!(
        target: "ingest",
        kept = report.kept.len(),
        csv = %cfg.csv_path.display(),
        json = %cfg.json_path.display(),
        "snapshots written"
    );
    Ok(report)
}
