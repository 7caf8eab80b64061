// src/ingest/parse.rs
//! Streaming Atom/RSS reader that flattens `entry` and `item` elements into
//! [`SignalRecord`]s.

use metrics::{counter, histogram};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::ingest::error::FeedError;
use crate::ingest::types::{SignalRecord, SignalSource};

#[derive(Clone, Copy)]
enum Field {
    Title,
    Link,
    Updated,
    PubDate,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"updated" => Some(Field::Updated),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

/// Record under construction. Each slot keeps only the first matching child.
struct Draft {
    depth: usize,
    /// Position in the output, reserved at the start tag.
    slot_idx: usize,
    title: Option<String>,
    link_text: Option<String>,
    link_href: Option<String>,
    updated: Option<String>,
    pub_date: Option<String>,
    capture: Option<(Field, String)>,
}

impl Draft {
    fn new(depth: usize, slot_idx: usize) -> Self {
        Self {
            depth,
            slot_idx,
            title: None,
            link_text: None,
            link_href: None,
            updated: None,
            pub_date: None,
            capture: None,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link_text,
            Field::Updated => &mut self.updated,
            Field::PubDate => &mut self.pub_date,
        }
    }

    /// Called when a direct child opens. Returns true if its text should be captured.
    fn open_child(&mut self, field: Field, e: &BytesStart<'_>) -> Result<bool, FeedError> {
        if self.slot(field).is_some() {
            return Ok(false);
        }
        if let Field::Link = field {
            // Atom: <link href="..."/>; only the first link element counts.
            if let Some(attr) = e.try_get_attribute("href").map_err(FeedError::parse)? {
                let href = attr.unescape_value().map_err(FeedError::parse)?;
                self.link_href = Some(href.into_owned());
            }
        }
        Ok(true)
    }

    fn close_child(&mut self, field: Field, text: String) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    fn finish(self, source: SignalSource) -> SignalRecord {
        let title = trimmed(self.title);
        let mut url = trimmed(self.link_text);
        if url.is_empty() {
            url = trimmed(self.link_href);
        }
        let mut posted_at = trimmed(self.updated);
        if posted_at.is_empty() {
            posted_at = trimmed(self.pub_date);
        }
        SignalRecord {
            title,
            source,
            url,
            posted_at,
        }
    }
}

fn trimmed(s: Option<String>) -> String {
    s.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn is_record_element(local_name: &[u8]) -> bool {
    local_name == b"entry" || local_name == b"item"
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// Parse an Atom or RSS document into records, in document order.
///
/// Any element named `entry` or `item` (namespace prefix ignored) at any depth
/// becomes one record, including records nested inside other records; only
/// each record's direct `title`, `link`, `updated` and `pubDate` children are read.
pub fn parse_feed(xml: &str, source: SignalSource) -> Result<Vec<SignalRecord>, FeedError> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);
    let mut reader = Reader::from_str(&xml_clean);

    // Ordered by start tag; filled when each record closes.
    let mut slots: Vec<Option<SignalRecord>> = Vec::new();
    let mut open: Vec<Draft> = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut root_closed = false;

    loop {
        let event = match reader.read_event() {
            Ok(ev) => ev,
            Err(e) => {
                return Err(FeedError::Parse(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
        };

        match event {
            Event::Start(e) => {
                if root_closed {
                    return Err(junk_after_root());
                }
                depth += 1;
                saw_root = true;
                let local = e.local_name();
                if let Some(top) = open.last_mut() {
                    if depth == top.depth + 1 {
                        if let Some(field) = Field::from_name(local.as_ref()) {
                            if top.open_child(field, &e)? {
                                top.capture = Some((field, String::new()));
                            }
                        }
                    }
                }
                if is_record_element(local.as_ref()) {
                    open.push(Draft::new(depth, slots.len()));
                    slots.push(None);
                }
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(junk_after_root());
                }
                saw_root = true;
                let local = e.local_name();
                // Self-closing child sits one level below the record.
                if let Some(top) = open.last_mut() {
                    if depth == top.depth {
                        if let Some(field) = Field::from_name(local.as_ref()) {
                            if top.open_child(field, &e)? {
                                top.close_child(field, String::new());
                            }
                        }
                    }
                }
                if is_record_element(local.as_ref()) {
                    slots.push(Some(Draft::new(depth + 1, slots.len()).finish(source)));
                }
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(t) => {
                if depth == 0 {
                    if !is_blank(&t) {
                        return Err(junk_outside_root(root_closed));
                    }
                } else if let Some(top) = open.last_mut() {
                    if depth == top.depth + 1 {
                        if let Some((_, buf)) = top.capture.as_mut() {
                            buf.push_str(&t.unescape().map_err(FeedError::parse)?);
                        }
                    }
                }
            }
            Event::CData(c) => {
                if depth == 0 {
                    return Err(junk_outside_root(root_closed));
                }
                if let Some(top) = open.last_mut() {
                    if depth == top.depth + 1 {
                        if let Some((_, buf)) = top.capture.as_mut() {
                            buf.push_str(&String::from_utf8_lossy(&c));
                        }
                    }
                }
            }
            Event::End(_) => {
                match open.last().map(|d| d.depth) {
                    Some(rd) if depth == rd + 1 => {
                        if let Some(top) = open.last_mut() {
                            if let Some((field, text)) = top.capture.take() {
                                top.close_child(field, text);
                            }
                        }
                    }
                    Some(rd) if depth == rd => {
                        if let Some(done) = open.pop() {
                            let idx = done.slot_idx;
                            slots[idx] = Some(done.finish(source));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Eof => {
                if depth != 0 {
                    return Err(FeedError::Parse(format!(
                        "unexpected end of document, {depth} element(s) left open"
                    )));
                }
                if !saw_root {
                    return Err(FeedError::Parse("no element found".to_string()));
                }
                break;
            }
            _ => {}
        }
    }

    let out: Vec<SignalRecord> = slots.into_iter().flatten().collect();

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_events_total").increment(out.len() as u64);
    Ok(out)
}

fn junk_after_root() -> FeedError {
    FeedError::Parse("junk after document element".to_string())
}

fn junk_outside_root(root_closed: bool) -> FeedError {
    if root_closed {
        junk_after_root()
    } else {
        FeedError::Parse("text before document element".to_string())
    }
}

/// Feeds often carry HTML entities that are not defined in XML.
/// CDATA sections are copied untouched; entities there are literal text.
fn scrub_html_entities_for_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("<![CDATA[") {
        out.push_str(&scrub_entities(&rest[..start]));
        let section = &rest[start..];
        match section.find("]]>") {
            Some(end) => {
                out.push_str(&section[..end + 3]);
                rest = &section[end + 3..];
            }
            None => {
                // unterminated; the reader reports it
                out.push_str(section);
                rest = "";
            }
        }
    }
    out.push_str(&scrub_entities(rest));
    out
}

fn scrub_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
