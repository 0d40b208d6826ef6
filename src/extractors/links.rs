//! Link resolution and pagination discovery

use scraper::{ElementRef, Html};
use url::Url;

use super::css_extractor::{element_text, select_all};

/// Resolve an href against `base`.
/// Skips empty, javascript:, mailto:, tel: and fragment-only links, and
/// anything that does not end up http(s).
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    matches!(absolute.scheme(), "http" | "https").then(|| absolute.to_string())
}

/// Absolute URLs of the `href`s of `elements`, in document order.
pub fn resolve_all(base: &Url, elements: &[ElementRef<'_>]) -> Vec<String> {
    elements
        .iter()
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| resolve_href(base, href))
        .collect()
}

/// Extract links from HTML using a CSS selector
/// Returns a list of absolute URLs
pub fn extract_links(document: &Html, selector: &str, base: &Url) -> Vec<String> {
    let sel = if selector.is_empty() { "a[href]" } else { selector };
    resolve_all(base, &select_all(document, sel))
}

/// `<link rel="next">` or `<a rel="next">`
pub fn rel_next(document: &Html, base: &Url) -> Option<String> {
    ["link[rel='next']", "a[rel='next']"]
        .iter()
        .flat_map(|sel| extract_links(document, sel, base))
        .next()
}

fn is_next_text(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    lower.contains("próxima")
        || lower.contains("proxima")
        || matches!(lower.as_str(), "next" | "next page" | ">>" | "›" | "»")
}

/// First anchor whose text reads like "next page".
pub fn next_by_text(document: &Html, base: &Url) -> Option<String> {
    select_all(document, "a[href]")
        .into_iter()
        .filter(|a| is_next_text(&element_text(*a)))
        .find_map(|a| a.value().attr("href").and_then(|href| resolve_href(base, href)))
}
