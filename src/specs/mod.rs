// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific knowledge lives here: *where the ground truth sits in the
//! HTML* and *how to read it robustly*.
//!
//! ## What lives here
//! - `quiz`: locating the embedded chart payload among the page's
//!   `div.level3` blocks, the page title, season/week.
//! - `record`: the `<br>`-separated mini-markup of a single question.
//!
//! ## What does **not** live here
//! - Fetching and decoding (`core::net`, `config::options::PageEncoding`).
//! - Ordering (`classify`), decks (`deck`), the summary (`summary`).
//!
//! ## Typical call chain
//! ```text
//! runner → specs::quiz::parse_page → specs::record::parse_record (per fragment)
//!        → classify::sort_quiz → deck / summary
//! ```
//!
//! ## Conventions
//! - A fragment that does not parse is **dropped and recorded** as a
//!   `model::Discard`, never turned into a partial record.
//! - Specs are testable **offline** against inline fixtures.
pub mod quiz;
pub mod record;
