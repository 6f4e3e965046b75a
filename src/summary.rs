// src/summary.rs
//! Machine-readable digest of one page: season/week plus every part's themes
//! and sorted records.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::classify::summary_themes;
use crate::error::Result;
use crate::file::ensure_parent;
use crate::model::{PageMeta, Quiz, QuizRecord};

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub season: u32,
    pub week: u32,
    pub parts: Vec<PartSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PartSummary<'a> {
    pub sequence: usize,
    /// Mystery Box themes left out.
    pub themes: Vec<String>,
    /// Every record, Mystery Box included, in deck order.
    pub questions: &'a [QuizRecord],
}

impl<'a> Summary<'a> {
    /// `quiz` is expected to be sorted already.
    pub fn build(meta: PageMeta, quiz: &'a Quiz) -> Self {
        let parts = quiz
            .parts
            .iter()
            .map(|part| PartSummary {
                sequence: part.sequence,
                themes: summary_themes(&part.records),
                questions: &part.records,
            })
            .collect();
        Self { season: meta.season, week: meta.week, parts }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whole document in one write.
    pub fn write(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
