// src/specs/quiz.rs
//! Scraping *spec* for a quiz page.
//!
//! Purpose:
//! - Find the embedded chart payload that carries the quiz (`div.level3` >
//!   `script[type="application/json"]`). Pages often embed several charts; the
//!   right one has the host marker in `x.layout.title.text`.
//! - Walk `x.data[*].text[*]` fragments through [`parse_record`] into parts.
//! - Read the page heading from `<title>` and derive season/week from it.
//!
//! Non-Responsibilities:
//! - **No sorting.** Parts come out in page order; see `classify`.
//! - **No I/O.** The caller fetches and decodes the page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::config::consts::DATASET_SELECTOR;
use crate::error::{Error, Result};
use crate::model::{Discard, PageMeta, Part, Quiz};
use super::record::parse_record;

static DATASET: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(DATASET_SELECTOR).expect("static dataset selector")
});
static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("static title selector")
});
static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+").expect("static integer pattern")
});

/// The payload chosen among the page's embedded charts.
#[derive(Debug)]
pub struct Located {
    pub payload: Value,
    /// False when no title carried the marker and the last payload was used.
    pub matched: bool,
}

/// Parse a whole page and extract its quiz, parts in page order.
pub fn parse_page(html_doc: &str, marker: &str) -> Result<Quiz> {
    let doc = Html::parse_document(html_doc);
    extract_quiz(&doc, marker)
}

pub fn extract_quiz(doc: &Html, marker: &str) -> Result<Quiz> {
    let located = locate_dataset(doc, marker)?;
    Ok(Quiz {
        page_title: page_title(doc),
        parts: extract_parts(&located.payload),
        dataset_matched: located.matched,
    })
}

pub fn locate_dataset(doc: &Html, marker: &str) -> Result<Located> {
    let mut last: Option<Value> = None;

    for (i, script) in doc.select(&DATASET).enumerate() {
        let raw: String = script.text().collect();
        let payload: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                logd!("Dataset candidate {i}: not JSON ({e})");
                continue;
            }
        };

        let title = chart_title(&payload).unwrap_or_default();
        if title.contains(marker) {
            logd!("Dataset candidate {i}: matched {title:?}");
            return Ok(Located { payload, matched: true });
        }
        logd!("Dataset candidate {i}: title {title:?} lacks {marker:?}");
        last = Some(payload);
    }

    match last {
        Some(payload) => {
            logw!("No dataset titled with {marker:?}; falling back to the last embedded payload");
            Ok(Located { payload, matched: false })
        }
        None => Err(Error::DatasetNotFound),
    }
}

/// `x.layout.title.text`, or a bare string `x.layout.title`.
fn chart_title(payload: &Value) -> Option<&str> {
    let title = payload.pointer("/x/layout/title")?;
    title
        .get("text")
        .and_then(Value::as_str)
        .or_else(|| title.as_str())
}

/// One Part per `x.data` entry that has a `text` field. Entries without one
/// contribute nothing and do not consume a sequence number.
pub fn extract_parts(payload: &Value) -> Vec<Part> {
    let Some(data) = payload.pointer("/x/data").and_then(Value::as_array) else {
        logw!("Dataset has no x.data array");
        return Vec::new();
    };

    let mut parts = Vec::with_capacity(data.len());
    for (i, entry) in data.iter().enumerate() {
        let fragments: Vec<&str> = match entry.get("text") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(one)) => vec![one.as_str()],
            _ => {
                logd!("x.data[{i}] has no text; skipped");
                continue;
            }
        };
        parts.push(parse_part(parts.len() + 1, &fragments));
    }
    parts
}

pub fn parse_part(sequence: usize, fragments: &[&str]) -> Part {
    let mut records = Vec::with_capacity(fragments.len());
    let mut discards = Vec::new();

    for (index, raw) in fragments.iter().enumerate() {
        match parse_record(raw) {
            Ok(rec) => records.push(rec),
            Err(reason) => {
                logd!("Part {sequence}, fragment {index}: dropped ({reason})");
                discards.push(Discard { index, reason });
            }
        }
    }

    Part { sequence, records, discards }
}

/// `<title>` trimmed. A `"<name> - <league> - <round>"` heading keeps only
/// the first and third segments.
pub fn page_title(doc: &Html) -> String {
    let Some(el) = doc.select(&TITLE).next() else {
        return s!();
    };
    let title = el.text().collect::<String>().trim().to_string();
    let segments: Vec<&str> = title.split(" - ").collect();
    if segments.len() >= 3 {
        format!("{} - {}", segments[0], segments[2])
    } else {
        title
    }
}

/// Season and week are the two integers in the title, in that order.
pub fn page_meta(title: &str) -> Result<PageMeta> {
    let numbers: Vec<&str> = INTEGER.find_iter(title).map(|m| m.as_str()).collect();
    let bad = || Error::Metadata { title: s!(title), found: numbers.len() };

    match numbers.as_slice() {
        [season, week] => Ok(PageMeta {
            season: season.parse().map_err(|_| bad())?,
            week: week.parse().map_err(|_| bad())?,
        }),
        _ => Err(bad()),
    }
}
