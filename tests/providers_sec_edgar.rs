// tests/providers_sec_edgar.rs
use exec_signal_scraper::ingest::providers::sec_edgar::SecEdgarProvider;
use exec_signal_scraper::ingest::types::{SignalSource, SourceProvider};

const SEC_XML: &str = include_str!("fixtures/sec_8k_atom.xml");

#[tokio::test]
async fn sec_fixture_parses_every_entry_with_href_links() {
    let provider = SecEdgarProvider::from_fixture(SEC_XML);

    let items = provider.fetch_latest().await.expect("sec parse ok");
    // feed-level <title>/<link> are not entries
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|r| r.source == SignalSource::SecFilings));
    assert!(items
        .iter()
        .all(|r| r.url.starts_with("https://www.sec.gov/Archives/edgar/data/")));
    assert_eq!(items[0].posted_at, "2024-05-02T16:58:12-04:00");
    assert_eq!(items[1].title, "8-K - GLOBEX INC (0000222222) (Filer) Item 1.01");
}

#[tokio::test]
async fn sec_fixture_broken_xml_is_an_error() {
    let truncated = &SEC_XML[..SEC_XML.len() / 2];
    let provider = SecEdgarProvider::from_fixture(truncated);
    assert!(provider.fetch_latest().await.is_err());
}
