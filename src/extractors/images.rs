//! Product image discovery and image metadata for claim detection

use scraper::Html;
use url::Url;

use super::css_extractor::{first_matching, select_all};
use super::links::resolve_href;

/// Gallery selectors, most specific first
pub const GALLERY_SELECTORS: &[&str] = &[
    "div.product-images img",
    "div.product-image img",
    "div.images img",
    "figure.woocommerce-product-gallery__wrapper img",
    "img#image-main",
    "img.wp-post-image",
    ".product-gallery__image img",
];

const SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-large_image"];

const EXCLUDED_MARKERS: &[&str] = &["icon", "logo"];

const BACK_MARKERS: &[&str] = &[
    "back",
    "verso",
    "traseira",
    "tabela",
    "label",
    "rotulo",
    "rótulo",
    "ingredientes",
    "ingredients",
];

/// Product image URLs: the first gallery selector with matches, else every
/// `<img>`; resolved, icons and logos dropped, deduplicated in order.
pub fn collect_image_urls(document: &Html, base: &Url) -> Vec<String> {
    let mut candidates = first_matching(document, GALLERY_SELECTORS);
    if candidates.is_empty() {
        candidates = select_all(document, "img");
    }

    let mut urls: Vec<String> = Vec::new();
    for img in candidates {
        let Some(src) = SOURCE_ATTRS
            .iter()
            .filter_map(|attr| img.value().attr(attr))
            .find(|v| !v.trim().is_empty())
        else {
            continue;
        };
        let Some(url) = resolve_href(base, src) else {
            continue;
        };
        let lower = url.to_lowercase();
        if EXCLUDED_MARKERS.iter().any(|m| lower.contains(m)) {
            continue;
        }
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// Front image is the first URL; back image is the first later URL that
/// mentions a back-of-pack marker, else the second URL.
pub fn front_and_back(urls: &[String]) -> (String, String) {
    let front = urls.first().cloned().unwrap_or_default();
    let back = urls
        .iter()
        .skip(1)
        .find(|u| {
            let lower = u.to_lowercase();
            BACK_MARKERS.iter().any(|m| lower.contains(m))
        })
        .or_else(|| urls.get(1))
        .cloned()
        .unwrap_or_default();
    (front, back)
}

/// `alt`, `title` and `src` values of every image on the page.
pub fn image_metadata(document: &Html) -> Vec<String> {
    let mut bits = Vec::new();
    for img in select_all(document, "img") {
        for attr in ["alt", "title", "src"] {
            if let Some(value) = img.value().attr(attr) {
                if !value.is_empty() {
                    bits.push(value.to_string());
                }
            }
        }
    }
    bits
}
