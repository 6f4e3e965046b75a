// src/specs/record.rs
//! Scraping *spec* for a single quiz record.
//!
//! A record arrives as one string of mini-markup, `<br>`-separated:
//!
//! ```text
//! <b>Player Name - Team</b><br>
//! Parte 1 Theme (xT = 0.45, xP = 1.2)<br>
//! <i>Question text</i><br>
//! <b>Resposta</b>: <i>Answer text</i><br>
//! Pontos: <b>2</b>
//! ```
//!
//! Segment 0 names the player, segment 1 carries the theme and metrics, the
//! question and answer are italic spans anywhere, and the last segment holds
//! the points awarded. A fragment without the theme annotation is discarded.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{ANSWER_ANCHOR, GUESSED_POINTS, PART_PREFIX};
use crate::core::html::{FieldRule, Fragment, flatten_br, split_br};
use crate::model::{DiscardReason, QuizRecord};

static THEME_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*\(xT\s*=\s*([\d.]+),\s*xP\s*=\s*([\d.]+)\)")
        .expect("static theme pattern")
});

static PART_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{PART_PREFIX}\s\d\s")).expect("static part pattern")
});

const PLAYER: FieldRule<'static> = FieldRule::FirstTag("b");
const QUESTION: FieldRule<'static> = FieldRule::FirstTag("i");
const ANSWER: FieldRule<'static> = FieldRule::TagAfterAnchor {
    anchor: "b",
    anchor_text: ANSWER_ANCHOR,
    tag: "i",
};
const POINTS: FieldRule<'static> = FieldRule::FirstTag("b");

/// Parse one raw fragment into a record, or say why it was dropped.
pub fn parse_record(raw: &str) -> Result<QuizRecord, DiscardReason> {
    let segments = split_br(raw);
    if segments.len() < 2 {
        return Err(DiscardReason::TooFewSegments);
    }

    let (theme, xt, xp) = parse_theme_line(segments[1])?;

    let player = Fragment::parse(segments[0])
        .field(PLAYER)
        .map(|name| match name.split_once(" - ") {
            Some((left, _)) => left.trim().to_string(),
            None => name,
        });

    let whole = Fragment::parse(&flatten_br(raw));
    let question = whole.field(QUESTION).unwrap_or_default();
    let answer = whole.field(ANSWER).unwrap_or_default();

    // segments is non-empty here
    let last = segments[segments.len() - 1];
    let guessed = Fragment::parse(last)
        .field(POINTS)
        .is_some_and(|pts| pts == GUESSED_POINTS);

    Ok(QuizRecord { theme, xt, xp, question, answer, player, guessed })
}

/// `Parte 1 Some Theme (xT = 0.1, xP = 2)` → `("Some Theme", 0.1, 2.0)`.
pub fn parse_theme_line(segment: &str) -> Result<(String, f64, f64), DiscardReason> {
    let line = Fragment::parse(segment).text();
    let caps = THEME_LINE
        .captures(&line)
        .ok_or(DiscardReason::NoThemeAnnotation)?;

    let metric = |i: usize| -> Result<f64, DiscardReason> {
        let raw = &caps[i];
        raw.parse::<f64>().map_err(|_| DiscardReason::BadMetric(s!(raw)))
    };
    let xt = metric(2)?;
    let xp = metric(3)?;

    let theme = PART_TOKEN.replace(caps[1].trim(), "").trim().to_string();
    if theme.is_empty() {
        return Err(DiscardReason::EmptyTheme);
    }
    Ok((theme, xt, xp))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "<b>Rui Costa - Benfica</b><br>Parte 1 Carreira (xT = 0.45, xP = 1.5)<br>\
        <i>Em que ano se estreou?</i><br><b>Resposta</b>: <i>1991</i><br>Pontos: <b>2</b>";

    #[test]
    fn parses_every_field() {
        let rec = parse_record(FULL).unwrap();
        assert_eq!(rec.theme, "Carreira");
        assert_eq!(rec.xt, 0.45);
        assert_eq!(rec.xp, 1.5);
        assert_eq!(rec.question, "Em que ano se estreou?");
        assert_eq!(rec.answer, "1991");
        assert_eq!(rec.player.as_deref(), Some("Rui Costa"));
        assert!(rec.guessed);
    }

    #[test]
    fn discards_fragment_without_annotation() {
        let raw = "<b>Rui</b><br>Carreira sem métricas<br><i>Q</i>";
        assert_eq!(parse_record(raw), Err(DiscardReason::NoThemeAnnotation));
        assert_eq!(parse_record("<b>Rui</b> only"), Err(DiscardReason::TooFewSegments));
    }

    #[test]
    fn malformed_metric_discards_whole_record() {
        let raw = "<b>Rui</b><br>Carreira (xT = 0.4.5, xP = 1)<br><i>Q</i>";
        assert_eq!(parse_record(raw), Err(DiscardReason::BadMetric(s!("0.4.5"))));
    }

    #[test]
    fn thousands_separator_is_not_a_metric() {
        let raw = "<b>Rui</b><br>Carreira (xT = 1,000, xP = 1)<br><i>Q</i>";
        assert_eq!(parse_record(raw), Err(DiscardReason::NoThemeAnnotation));
    }

    #[test]
    fn missing_player_is_none_not_inherited() {
        let first = parse_record(FULL).unwrap();
        assert!(first.player.is_some());
        let raw = "sem jogador<br>Carreira (xT = 0.1, xP = 1)<br><i>Q</i><br>Pontos: <b>0</b>";
        let rec = parse_record(raw).unwrap();
        assert_eq!(rec.player, None);
    }

    #[test]
    fn only_exact_two_points_counts_as_guessed() {
        let with_points = |pts: &str| {
            format!("<b>P</b><br>T (xT = 0, xP = 0)<br><i>Q</i><br>Pontos: {pts}")
        };
        assert!(parse_record(&with_points("<b>2</b>")).unwrap().guessed);
        assert!(!parse_record(&with_points("<b>1</b>")).unwrap().guessed);
        assert!(!parse_record(&with_points("<b></b>")).unwrap().guessed);
        assert!(!parse_record(&with_points("<b>22</b>")).unwrap().guessed);
        assert!(!parse_record(&with_points("nenhum")).unwrap().guessed);
    }

    #[test]
    fn part_prefix_is_stripped_only_at_start() {
        let (theme, _, _) = parse_theme_line("Parte 2 Mystery Box 1 (xT = 0, xP = 1)").unwrap();
        assert_eq!(theme, "Mystery Box 1");
        let (theme, _, _) = parse_theme_line("Clube Parte 2 X (xT = 0, xP = 1)").unwrap();
        assert_eq!(theme, "Clube Parte 2 X");
    }

    #[test]
    fn missing_question_and_answer_are_empty() {
        let raw = "<b>P</b><br>Tema (xT = 0.2, xP = 3)<br>sem itálicos";
        let rec = parse_record(raw).unwrap();
        assert_eq!(rec.question, "");
        assert_eq!(rec.answer, "");
    }

    #[test]
    fn annotation_without_theme_is_discarded() {
        let raw = "<b>P</b><br>(xT = 0.2, xP = 3)";
        assert_eq!(parse_record(raw), Err(DiscardReason::EmptyTheme));
    }
}
