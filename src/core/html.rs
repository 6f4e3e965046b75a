// src/core/html.rs
//! Tag-tree helpers for the record mini-markup.
//!
//! Records are short HTML fragments: a few `<b>` and `<i>` spans separated by
//! `<br>`. Fields are pulled out with [`FieldRule`]s evaluated over a parsed
//! fragment, in document order.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::sanitize::normalize_ws;

static BR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?\s*>").expect("static <br> pattern")
});

/// Split a fragment at every `<br>`, `<br/>` or `<br />`.
pub fn split_br(markup: &str) -> Vec<&str> {
    BR.split(markup).collect()
}

/// Replace every line break tag with a single space.
pub fn flatten_br(markup: &str) -> String {
    BR.replace_all(markup, " ").into_owned()
}

/// Where a field lives inside a fragment.
#[derive(Clone, Copy, Debug)]
pub enum FieldRule<'a> {
    /// First element with this tag name.
    FirstTag(&'a str),
    /// First `tag` element after the first `anchor` element whose text is `anchor_text`.
    TagAfterAnchor {
        anchor: &'a str,
        anchor_text: &'a str,
        tag: &'a str,
    },
}

/// A parsed markup fragment.
pub struct Fragment {
    html: Html,
}

impl Fragment {
    pub fn parse(markup: &str) -> Self {
        Self { html: Html::parse_fragment(markup) }
    }

    /// All elements in document order.
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    pub fn find(&self, rule: FieldRule<'_>) -> Option<ElementRef<'_>> {
        let mut els = self.elements();
        match rule {
            FieldRule::FirstTag(tag) => els.find(|e| e.value().name() == tag),
            FieldRule::TagAfterAnchor { anchor, anchor_text, tag } => {
                els.find(|e| e.value().name() == anchor && text_of(*e) == anchor_text)?;
                els.find(|e| e.value().name() == tag)
            }
        }
    }

    /// Normalized text of the element `rule` selects.
    pub fn field(&self, rule: FieldRule<'_>) -> Option<String> {
        self.find(rule).map(text_of)
    }

    /// Normalized text of the whole fragment, tags dropped and entities decoded.
    pub fn text(&self) -> String {
        normalize_ws(&self.html.root_element().text().collect::<String>())
    }
}

pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}
