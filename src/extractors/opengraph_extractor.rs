//! OpenGraph meta tags extraction
//!
//! Reads the og: tags product pages use for sharing previews, plus the
//! standard description meta tag.

use scraper::Html;

use super::css_extractor::select_all;
use crate::text::normalize_space;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub site_name: Option<String>,
    pub images: Vec<String>,
}

pub fn extract_opengraph(document: &Html) -> OpenGraph {
    let mut og = OpenGraph::default();
    let mut meta_description = None;

    for element in select_all(document, "meta") {
        let content = normalize_space(element.value().attr("content").unwrap_or(""));
        if content.is_empty() {
            continue;
        }

        if let Some(prop) = element.value().attr("property") {
            match prop {
                "og:title" => {
                    og.title.get_or_insert(content);
                }
                "og:description" => {
                    og.description.get_or_insert(content);
                }
                "og:site_name" => {
                    og.site_name.get_or_insert(content);
                }
                "og:image" | "og:image:url" | "og:image:secure_url" => {
                    if !og.images.contains(&content) {
                        og.images.push(content);
                    }
                }
                _ => {}
            }
        } else if element.value().attr("name") == Some("description") {
            meta_description.get_or_insert(content);
        }
    }

    if og.description.is_none() {
        og.description = meta_description;
    }
    og
}
