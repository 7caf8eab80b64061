// tests/output_files.rs
use exec_signal_scraper::ingest::types::{SignalRecord, SignalSource};
use exec_signal_scraper::write_outputs;
use std::fs;

fn records() -> Vec<SignalRecord> {
    vec![
        SignalRecord {
            title: "8-K - ACME CORP Item 5.02".into(),
            source: SignalSource::SecFilings,
            url: "https://www.sec.gov/Archives/a".into(),
            posted_at: "2024-05-02T16:58:12-04:00".into(),
        },
        SignalRecord {
            title: "Société Générale nomme un nouveau CEO".into(),
            source: SignalSource::GoogleNews,
            url: String::new(),
            posted_at: String::new(),
        },
    ]
}

#[test]
fn json_round_trips_to_the_same_records() {
    let dir = tempfile::tempdir().unwrap();
    let csv_p = dir.path().join("out.csv");
    let json_p = dir.path().join("out.json");

    write_outputs(&records(), &csv_p, &json_p).unwrap();

    let back: Vec<SignalRecord> = serde_json::from_str(&fs::read_to_string(&json_p).unwrap()).unwrap();
    assert_eq!(back, records());
}

#[test]
fn outputs_overwrite_previous_runs() {
    let dir = tempfile::tempdir().unwrap();
    let csv_p = dir.path().join("out.csv");
    let json_p = dir.path().join("out.json");
    fs::write(&csv_p, "stale,data\n".repeat(100)).unwrap();
    fs::write(&json_p, "not json at all").unwrap();

    write_outputs(&records()[..1], &csv_p, &json_p).unwrap();

    let csv = fs::read_to_string(&csv_p).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(!csv.contains("stale"));

    let back: Vec<SignalRecord> = serde_json::from_str(&fs::read_to_string(&json_p).unwrap()).unwrap();
    assert_eq!(back.len(), 1);
}

#[test]
fn csv_rows_read_back_with_header_order() {
    let dir = tempfile::tempdir().unwrap();
    let csv_p = dir.path().join("out.csv");
    write_outputs(&records(), &csv_p, &dir.path().join("out.json")).unwrap();

    let mut rdr = csv::Reader::from_path(&csv_p).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["title", "source", "url", "posted_at"]);

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "SEC EDGAR 8-K 5.02");
    assert_eq!(&rows[1][0], "Société Générale nomme un nouveau CEO");
    assert_eq!(&rows[1][2], "");
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no/such/dir/out.csv");
    assert!(write_outputs(&records(), &missing, &dir.path().join("out.json")).is_err());
}
