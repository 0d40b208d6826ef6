//! HTML extraction modules
//!
//! Each module provides extraction for a specific part of a page.

mod css_extractor;
mod images;
mod jsonld_extractor;
mod links;
mod opengraph_extractor;

pub use css_extractor::*;
pub use images::*;
pub use jsonld_extractor::*;
pub use links::*;
pub use opengraph_extractor::*;

use scraper::Html;

const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Visible page text: trimmed text nodes outside script/style, one per line.
pub fn visible_text(document: &Html) -> String {
    let mut parts = Vec::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join("\n")
}
