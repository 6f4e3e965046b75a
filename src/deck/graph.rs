// src/deck/graph.rs
//! Slide graph for one part.
//!
//! Layout is positional: the Index is slide 0 and record `n` (1-based) owns
//! question slide `2n-1` and answer slide `2n`. Edges are never computed from
//! those formulas though. The build runs in two passes: pass 1 creates every
//! slide and remembers where each record and each theme's first question
//! landed, pass 2 wires edges by looking those up.

use std::collections::HashMap;

use crate::classify::{distinct_themes, theme_key};
use crate::error::{Error, Result};
use crate::model::QuizRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(pub usize);

impl SlideId {
    pub const INDEX: SlideId = SlideId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideKind {
    Index,
    /// `record` is the 0-based position in the part's sorted records.
    Question { record: usize },
    Answer { record: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    pub kind: SlideKind,
    pub title: String,
    pub body: String,
    pub footer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeRole {
    /// Index paragraph jumping to the theme's first question.
    ToTheme(String),
    ToIndex,
    ToAnswer,
    ToQuestion,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: SlideId,
    pub to: SlideId,
    pub role: EdgeRole,
}

#[derive(Clone, Debug)]
pub struct SlideGraph {
    slides: Vec<Slide>,
    edges: Vec<Edge>,
}

impl SlideGraph {
    /// `records` must already be sorted; see `classify::sort_part`.
    pub fn build(identifier: &str, records: &[QuizRecord]) -> Result<Self> {
        if let Some(w) = records
            .windows(2)
            .find(|w| theme_key(&w[0].theme) > theme_key(&w[1].theme))
        {
            return Err(Error::Inconsistent(format!(
                "records reached the deck unsorted ({:?} before {:?})",
                w[0].theme, w[1].theme
            )));
        }

        // Pass 1: nodes
        let mut slides = Vec::with_capacity(2 * records.len() + 1);
        slides.push(Slide {
            id: SlideId::INDEX,
            kind: SlideKind::Index,
            title: s!(identifier),
            body: s!(),
            footer: None,
        });

        let mut pairs: Vec<(SlideId, SlideId)> = Vec::with_capacity(records.len());
        let mut first_question: HashMap<&str, SlideId> = HashMap::new();

        for (record, rec) in records.iter().enumerate() {
            let q = push_slide(&mut slides, SlideKind::Question { record }, rec, s!(&rec.question), None);
            let a = push_slide(&mut slides, SlideKind::Answer { record }, rec, s!(&rec.answer), Some(footer_text(rec.xp)));
            first_question.entry(rec.theme.as_str()).or_insert(q);
            pairs.push((q, a));
        }

        // Pass 2: edges
        let mut edges = Vec::with_capacity(4 * pairs.len() + first_question.len());

        for theme in distinct_themes(records) {
            let to = *first_question.get(theme.as_str()).ok_or_else(|| {
                Error::Inconsistent(format!("theme {theme:?} has no first question slide"))
            })?;
            edges.push(Edge { from: SlideId::INDEX, to, role: EdgeRole::ToTheme(theme) });
        }

        for (q, a) in pairs {
            edges.push(Edge { from: q, to: SlideId::INDEX, role: EdgeRole::ToIndex });
            edges.push(Edge { from: q, to: a, role: EdgeRole::ToAnswer });
            edges.push(Edge { from: a, to: SlideId::INDEX, role: EdgeRole::ToIndex });
            edges.push(Edge { from: a, to: q, role: EdgeRole::ToQuestion });
        }

        Ok(Self { slides, edges })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.get(id.index())
    }

    pub fn edges_from(&self, id: SlideId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == id)
    }

    /// Where the Index link for `theme` lands.
    pub fn theme_target(&self, theme: &str) -> Option<SlideId> {
        self.edges.iter().find_map(|e| match &e.role {
            EdgeRole::ToTheme(t) if t == theme => Some(e.to),
            _ => None,
        })
    }
}

fn push_slide(
    slides: &mut Vec<Slide>,
    kind: SlideKind,
    rec: &QuizRecord,
    body: String,
    footer: Option<String>,
) -> SlideId {
    let id = SlideId(slides.len());
    slides.push(Slide { id, kind, title: s!(&rec.theme), body, footer });
    id
}

/// `xP: 1.5`; whole numbers keep one decimal (`xP: 2.0`).
pub fn footer_text(xp: f64) -> String {
    if xp.fract() == 0.0 {
        format!("xP: {xp:.1}")
    } else {
        format!("xP: {xp}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(theme: &str, xp: f64, question: &str, answer: &str) -> QuizRecord {
        QuizRecord {
            theme: s!(theme),
            xt: 0.0,
            xp,
            question: s!(question),
            answer: s!(answer),
            player: None,
            guessed: false,
        }
    }

    fn sample() -> Vec<QuizRecord> {
        // already sorted
        vec![
            rec("A", 2.0, "Q1", "A1"),
            rec("A", 3.0, "Q3", "A3"),
            rec("Mystery Box 1", 1.0, "Q2", "A2"),
        ]
    }

    #[test]
    fn positions_follow_record_order() {
        let g = SlideGraph::build("Quiz - Parte 1", &sample()).unwrap();
        assert_eq!(g.len(), 7);
        assert_eq!(g.slides()[0].kind, SlideKind::Index);
        assert_eq!(g.slides()[0].title, "Quiz - Parte 1");
        for n in 1..=3 {
            let q = &g.slides()[2 * n - 1];
            let a = &g.slides()[2 * n];
            assert_eq!(q.kind, SlideKind::Question { record: n - 1 });
            assert_eq!(a.kind, SlideKind::Answer { record: n - 1 });
            assert_eq!(q.title, a.title);
        }
        assert_eq!(g.slides()[3].body, "Q3");
        assert_eq!(g.slides()[4].body, "A3");
        assert_eq!(g.slides()[4].footer.as_deref(), Some("xP: 3.0"));
        assert_eq!(g.slides()[3].footer, None);
    }

    #[test]
    fn theme_links_hit_first_occurrence() {
        let g = SlideGraph::build("Q", &sample()).unwrap();
        assert_eq!(g.theme_target("A"), Some(SlideId(1)));
        assert_eq!(g.theme_target("Mystery Box 1"), Some(SlideId(5)));
        let index_edges: Vec<_> = g.edges_from(SlideId::INDEX).collect();
        assert_eq!(index_edges.len(), 2);
        assert!(index_edges.iter().all(|e| matches!(e.role, EdgeRole::ToTheme(_))));
    }

    #[test]
    fn every_other_slide_has_one_way_home() {
        let g = SlideGraph::build("Q", &sample()).unwrap();
        for slide in &g.slides()[1..] {
            let home = g
                .edges_from(slide.id)
                .filter(|e| e.role == EdgeRole::ToIndex && e.to == SlideId::INDEX)
                .count();
            assert_eq!(home, 1, "slide {:?}", slide.id);
        }
    }

    #[test]
    fn question_and_answer_point_at_each_other() {
        let g = SlideGraph::build("Q", &sample()).unwrap();
        let to_answer = g.edges_from(SlideId(3)).find(|e| e.role == EdgeRole::ToAnswer).unwrap();
        assert_eq!(to_answer.to, SlideId(4));
        let to_question = g.edges_from(SlideId(4)).find(|e| e.role == EdgeRole::ToQuestion).unwrap();
        assert_eq!(to_question.to, SlideId(3));
    }

    #[test]
    fn empty_part_is_just_the_index() {
        let g = SlideGraph::build("Vazio", &[]).unwrap();
        assert_eq!(g.len(), 1);
        assert!(g.edges().is_empty());
    }

    #[test]
    fn unsorted_input_is_an_internal_error() {
        let records = vec![rec("Mystery Box 1", 1.0, "Q2", "A2"), rec("A", 2.0, "Q1", "A1")];
        let err = SlideGraph::build("Q", &records).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn footer_whole_numbers_keep_one_decimal() {
        assert_eq!(footer_text(2.0), "xP: 2.0");
        assert_eq!(footer_text(1.25), "xP: 1.25");
    }
}
