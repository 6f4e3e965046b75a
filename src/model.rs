// src/model.rs
//! Records and containers produced by extraction and consumed by the deck
//! builder and the summary emitter.

use serde::Serialize;

/// One question/answer unit from the quiz page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizRecord {
    pub theme: String,
    #[serde(rename = "xT")]
    pub xt: f64,
    #[serde(rename = "xP")]
    pub xp: f64,
    pub question: String,
    pub answer: String,
    pub player: Option<String>,
    pub guessed: bool,
}

/// Why a raw fragment did not become a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    TooFewSegments,
    NoThemeAnnotation,
    BadMetric(String),
    EmptyTheme,
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardReason::TooFewSegments => f.write_str("fewer than two <br> segments"),
            DiscardReason::NoThemeAnnotation => f.write_str("no (xT = …, xP = …) annotation"),
            DiscardReason::BadMetric(raw) => write!(f, "unparsable metric {raw:?}"),
            DiscardReason::EmptyTheme => f.write_str("empty theme"),
        }
    }
}

/// A dropped fragment and its position in the part's raw list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discard {
    pub index: usize,
    pub reason: DiscardReason,
}

/// One quiz segment, rendered as its own deck.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    /// 1-based.
    pub sequence: usize,
    pub records: Vec<QuizRecord>,
    pub discards: Vec<Discard>,
}

impl Part {
    /// Distinct themes in deck order, Mystery Box included.
    pub fn themes(&self) -> Vec<String> {
        crate::classify::distinct_themes(&self.records)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quiz {
    pub page_title: String,
    pub parts: Vec<Part>,
    /// False when the locator fell back to the last payload on the page.
    pub dataset_matched: bool,
}

impl Quiz {
    pub fn record_count(&self) -> usize {
        self.parts.iter().map(|p| p.records.len()).sum()
    }

    pub fn discard_count(&self) -> usize {
        self.parts.iter().map(|p| p.discards.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub season: u32,
    pub week: u32,
}
