// tests/metrics_ingest.rs
use exec_signal_scraper::config::ScraperConfig;
use exec_signal_scraper::ingest::filter::SignalFilters;
use exec_signal_scraper::ingest::providers::google_news::GoogleNewsProvider;
use exec_signal_scraper::ingest::types::SourceProvider;
use exec_signal_scraper::run_once;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::MetricKind;

const NEWS_XML: &str = include_str!("fixtures/google_news_rss.xml");

#[test]
fn run_records_counts_and_last_run_timestamp() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    // Local recorder is thread-bound, so drive the run on this thread.
    let report = metrics::with_local_recorder(&recorder, || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let providers: Vec<Box<dyn SourceProvider>> =
            vec![Box::new(GoogleNewsProvider::from_fixture(NEWS_XML))];
        let filters = SignalFilters::from_config(&ScraperConfig::default()).unwrap();
        rt.block_on(run_once(&providers, &filters))
    });

    let before = chrono::Utc::now().timestamp();
    let mut last_run_ts = None;
    let mut kept_total = None;
    for (key, _, _, value) in snapshotter.snapshot().into_vec() {
        match (key.kind(), key.key().name(), value) {
            (MetricKind::Gauge, "ingest_pipeline_last_run_ts", DebugValue::Gauge(v)) => {
                last_run_ts = Some(v.into_inner());
            }
            (MetricKind::Counter, "ingest_kept_total", DebugValue::Counter(n)) => {
                kept_total = Some(n);
            }
            _ => {}
        }
    }

    assert_eq!(kept_total, Some(report.kept.len() as u64));
    let ts = last_run_ts.expect("last run gauge recorded");
    // Unix seconds, not millis and not zero
    assert!(ts > 1_600_000_000.0);
    assert!((before as f64 - ts).abs() < 60.0);
}
