// src/output.rs
//! CSV and JSON snapshot writers. Both overwrite whatever is at the target path.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::ingest::types::SignalRecord;

/// Header row, in column order.
pub const CSV_HEADER: [&str; 4] = ["title", "source", "url", "posted_at"];

pub fn write_csv<W: Write>(records: &[SignalRecord], out: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(out);
    if records.is_empty() {
        // serialize() emits the header with the first row; an empty run still gets one.
        w.write_record(CSV_HEADER)?;
    }
    for rec in records {
        w.serialize(rec)?;
    }
    w.flush()?;
    Ok(())
}

/// Pretty JSON array, 2-space indent.
pub fn write_json<W: Write>(records: &[SignalRecord], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, records)?;
    out.flush()?;
    Ok(())
}

pub fn write_csv_file(records: &[SignalRecord], path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(records, BufWriter::new(f)).with_context(|| format!("writing {}", path.display()))
}

pub fn write_json_file(records: &[SignalRecord], path: &Path) -> Result<()> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_json(records, BufWriter::new(f)).with_context(|| format!("writing {}", path.display()))
}

/// Write both snapshots, CSV first.
pub fn write_outputs(records: &[SignalRecord], csv_path: &Path, json_path: &Path) -> Result<()> {
    write_csv_file(records, csv_path)?;
    write_json_file(records, json_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::SignalSource;

    fn sample() -> Vec<SignalRecord> {
        vec![
            SignalRecord {
                title: "8-K - Acme, Inc. (Item 5.02)".into(),
                source: SignalSource::SecFilings,
                url: "https://www.sec.gov/a".into(),
                posted_at: "2024-05-01T16:05:00-04:00".into(),
            },
            SignalRecord {
                title: "Globex names \"interim\" CFO".into(),
                source: SignalSource::GoogleNews,
                url: String::new(),
                posted_at: "Wed, 01 May 2024 12:00:00 GMT".into(),
            },
        ]
    }

    #[test]
    fn csv_has_fixed_header_and_quotes_fields() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "title,source,url,posted_at");
        assert_eq!(
            lines[1],
            "\"8-K - Acme, Inc. (Item 5.02)\",SEC EDGAR 8-K 5.02,https://www.sec.gov/a,2024-05-01T16:05:00-04:00"
        );
        assert_eq!(
            lines[2],
            "\"Globex names \"\"interim\"\" CFO\",Google News,,\"Wed, 01 May 2024 12:00:00 GMT\""
        );
    }

    #[test]
    fn empty_run_still_writes_header_and_empty_array() {
        let mut csv_buf = Vec::new();
        write_csv(&[], &mut csv_buf).unwrap();
        assert_eq!(String::from_utf8(csv_buf).unwrap(), "title,source,url,posted_at\n");

        let mut json_buf = Vec::new();
        write_json(&[], &mut json_buf).unwrap();
        assert_eq!(String::from_utf8(json_buf).unwrap(), "[]");
    }

    #[test]
    fn csv_header_follows_record_field_order() {
        let mut buf = Vec::new();
        write_csv(&sample()[..1], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next(), Some(CSV_HEADER.join(",").as_str()));
    }

    #[test]
    fn json_uses_two_space_indent_and_field_names() {
        let mut buf = Vec::new();
        write_json(&sample()[..1], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("[\n  {\n    \"title\": "));
        assert!(text.contains("\"source\": \"SEC EDGAR 8-K 5.02\""));
        assert!(text.contains("\"posted_at\": "));
    }
}
