// src/deck/mod.rs
//! Slide decks: the per-part graph, the file-format seam and its `.pptx` writer.

pub mod graph;
pub mod pptx;
pub mod render;

use std::path::Path;

use crate::error::Result;

pub use graph::{Edge, EdgeRole, Slide, SlideGraph, SlideId, SlideKind};
pub use pptx::PptxDeck;
pub use render::render;

/// Clickable navigation controls placed in a slide's bottom-right corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Home,
    /// Reveal the answer.
    Help,
    /// Back to the question.
    Back,
}

/// Presentation writer. Slides are addressed by the handle `add_slide` returns.
pub trait Deck {
    type Slide: Copy;

    fn add_slide(&mut self) -> Self::Slide;
    fn set_title(&mut self, slide: Self::Slide, text: &str);
    fn set_body(&mut self, slide: Self::Slide, text: &str);
    /// Centered, muted line along the bottom edge.
    fn set_footer(&mut self, slide: Self::Slide, text: &str);
    fn add_button(&mut self, slide: Self::Slide, button: Button, target: Self::Slide);
    /// Body paragraph that jumps to `target` when clicked.
    fn add_link(&mut self, slide: Self::Slide, text: &str, target: Self::Slide);
    fn save(&self, path: &Path) -> Result<()>;
}
