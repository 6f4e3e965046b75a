// src/config/consts.rs

// Input
/// Pages processed when none are given on the command line.
pub const DEFAULT_URLS: &[&str] = &[];

/// Substring of the embedded chart title that identifies the quiz dataset.
pub const DATASET_TITLE_MARKER: &str = "QNpt";

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; quiz_deck/0.3)";
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// Page markup
pub const DATASET_SELECTOR: &str = r#"div.level3 script[type="application/json"]"#;
pub const PART_PREFIX: &str = "Parte";
pub const ANSWER_ANCHOR: &str = "Resposta";
pub const GUESSED_POINTS: &str = "2";
pub const MYSTERY_BOX: &str = "Mystery Box";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DECK_EXT: &str = "pptx";
pub const SUMMARY_EXT: &str = "json";
pub const FOOTER_RGB: &str = "C0C0C0";
