//! Executive Signal Scraper — Binary Entrypoint
//! Loads config, runs the SEC + Google News pipeline once, writes CSV/JSON snapshots.

use anyhow::Context;
use exec_signal_scraper::{run_with_config, ScraperConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default; `LOG_FORMAT=json` switches to JSON lines.
/// Filter comes from `RUST_LOG`, falling back to our crate at info.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("exec_signal_scraper=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .ok()
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; EXEC_SIGNALS_CONFIG_PATH / RUST_LOG may live there.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = ScraperConfig::load_default().context("loading scraper config")?;
    let report = run_with_config(&cfg).await?;

    if !report.failed_providers.is_empty() {
        tracing::warn!(failed = ?report.failed_providers, "some sources were skipped");
    }

    println!(
        "Wrote {} records → {} / {}",
        report.kept.len(),
        cfg.csv_path.display(),
        cfg.json_path.display()
    );
    Ok(())
}
