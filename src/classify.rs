// src/classify.rs
//! Theme ordering: alphabetical, with Mystery Box themes always last.

use crate::config::consts::MYSTERY_BOX;
use crate::model::{Quiz, QuizRecord};

pub fn is_mystery_box(theme: &str) -> bool {
    theme.starts_with(MYSTERY_BOX)
}

/// Sort key shared by records and theme lists. `false < true` puts Mystery Box last.
pub fn theme_key(theme: &str) -> (bool, &str) {
    (is_mystery_box(theme), theme)
}

/// Stable: records with the same theme keep their page order, which the
/// deck relies on to find each theme's first question.
pub fn sort_part(records: &mut [QuizRecord]) {
    records.sort_by(|a, b| theme_key(&a.theme).cmp(&theme_key(&b.theme)));
}

pub fn sort_quiz(quiz: &mut Quiz) {
    for part in &mut quiz.parts {
        sort_part(&mut part.records);
    }
}

/// Each theme once, in sort-key order.
pub fn distinct_themes(records: &[QuizRecord]) -> Vec<String> {
    let mut themes: Vec<&str> = records.iter().map(|r| r.theme.as_str()).collect();
    themes.sort_by(|a, b| theme_key(a).cmp(&theme_key(b)));
    themes.dedup();
    themes.into_iter().map(String::from).collect()
}

/// Themes listed in the summary document: Mystery Box rounds left out.
pub fn summary_themes(records: &[QuizRecord]) -> Vec<String> {
    distinct_themes(records)
        .into_iter()
        .filter(|t| !is_mystery_box(t))
        .collect()
}
