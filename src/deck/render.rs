// src/deck/render.rs
use crate::error::Result;

use super::graph::{EdgeRole, SlideGraph};
use super::{Button, Deck};

/// Replay a graph onto a deck: every slide in id order, then every edge.
pub fn render<D: Deck>(graph: &SlideGraph, deck: &mut D) -> Result<()> {
    let mut handles = Vec::with_capacity(graph.len());

    for slide in graph.slides() {
        let h = deck.add_slide();
        deck.set_title(h, &slide.title);
        if !slide.body.is_empty() {
            deck.set_body(h, &slide.body);
        }
        if let Some(footer) = &slide.footer {
            deck.set_footer(h, footer);
        }
        handles.push(h);
    }

    for edge in graph.edges() {
        let (from, to) = (handles[edge.from.index()], handles[edge.to.index()]);
        match &edge.role {
            EdgeRole::ToTheme(theme) => deck.add_link(from, theme, to),
            EdgeRole::ToIndex => deck.add_button(from, Button::Home, to),
            EdgeRole::ToAnswer => deck.add_button(from, Button::Help, to),
            EdgeRole::ToQuestion => deck.add_button(from, Button::Back, to),
        }
    }
    Ok(())
}
