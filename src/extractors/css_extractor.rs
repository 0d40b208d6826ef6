//! CSS selector-based extraction
//!
//! Uses the scraper crate to select elements by CSS selectors. An invalid
//! selector matches nothing.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::text::normalize_space;

/// All elements matching a CSS selector
pub fn select_all<'a>(document: &'a Html, selector_str: &str) -> Vec<ElementRef<'a>> {
    let selector = match Selector::parse(selector_str) {
        Ok(s) => s,
        Err(_) => {
            debug!(selector = selector_str, "invalid selector skipped");
            return vec![];
        }
    };

    document.select(&selector).collect()
}

/// Text of an element with whitespace normalized
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_space(&element.text().collect::<Vec<_>>().join(" "))
}

/// Extract first matching element's text
pub fn first_text(document: &Html, selector_str: &str) -> Option<String> {
    select_all(document, selector_str)
        .into_iter()
        .next()
        .map(element_text)
}

/// Extract first matching element's attribute
pub fn first_attr(document: &Html, selector_str: &str, attr_name: &str) -> Option<String> {
    select_all(document, selector_str)
        .into_iter()
        .next()
        .and_then(|el| el.value().attr(attr_name).map(String::from))
}

/// Elements of the first selector in `selectors` that matches anything.
pub fn first_matching<'a>(document: &'a Html, selectors: &[&str]) -> Vec<ElementRef<'a>> {
    selectors
        .iter()
        .map(|sel| select_all(document, sel))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

/// Text of the first selector whose first match is longer than `min_chars`.
pub fn pick_text(document: &Html, selectors: &[&str], min_chars: usize) -> Option<String> {
    selectors
        .iter()
        .filter_map(|sel| first_text(document, sel))
        .find(|text| text.chars().count() > min_chars)
}

/// First paragraph longer than `min_chars` that `accept` lets through.
pub fn long_paragraph(
    document: &Html,
    min_chars: usize,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    select_all(document, "p")
        .into_iter()
        .map(element_text)
        .find(|text| text.chars().count() > min_chars && accept(text))
}

/// Text of every `nav.breadcrumb`, `div.breadcrumb` and `ol.breadcrumb`
pub fn breadcrumbs(document: &Html) -> Vec<String> {
    ["nav.breadcrumb", "div.breadcrumb", "ol.breadcrumb"]
        .iter()
        .filter_map(|sel| first_text(document, sel))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_and_attr() {
        let html = r#"
        <html>
        <body>
            <h1 class="product_title">  Shampoo
                Hidratante </h1>
            <a href="/produto/123" class="link">Produto</a>
        </body>
        </html>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            first_text(&document, "h1.product_title").unwrap(),
            "Shampoo Hidratante"
        );
        assert_eq!(
            first_attr(&document, ".link", "href").unwrap(),
            "/produto/123"
        );
        assert!(first_text(&document, "h2").is_none());
        assert!(select_all(&document, "a[[").is_empty());
    }

    #[test]
    fn test_first_matching_stops_at_first_hit() {
        let html = r#"
        <ul>
            <li class="product"><a class="loop" href="/a">A</a></li>
            <li class="product"><a class="loop" href="/b">B</a></li>
        </ul>
        <a class="other" href="/c">C</a>
        "#;
        let document = Html::parse_document(html);

        let found = first_matching(&document, &["a.missing", "a.loop", "a.other"]);
        assert_eq!(found.len(), 2);
        assert!(first_matching(&document, &["a.missing"]).is_empty());
    }

    #[test]
    fn test_pick_text_threshold() {
        let html = r#"
        <h1 class="short">Kit</h1>
        <h1 class="name">Máscara Reconstrutora 500g</h1>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(
            pick_text(&document, &["h1.short", "h1.name"], 5).unwrap(),
            "Máscara Reconstrutora 500g"
        );
        assert!(pick_text(&document, &["h1.short"], 5).is_none());
    }

    #[test]
    fn test_long_paragraph() {
        let html = r#"
        <p>Curto.</p>
        <p>Usamos cookies para melhorar sua experiência de navegação em nosso site e loja.</p>
        <p>Shampoo de limpeza suave com extrato de babosa para cabelos cacheados e crespos.</p>
        "#;
        let document = Html::parse_document(html);

        let text = long_paragraph(&document, 60, |t| !t.to_lowercase().contains("cookie"));
        assert!(text.unwrap().starts_with("Shampoo de limpeza"));
    }

    #[test]
    fn test_breadcrumbs() {
        let html = r#"<nav class="breadcrumb">Home › Cabelos › Máscaras</nav>"#;
        let document = Html::parse_document(html);
        assert_eq!(breadcrumbs(&document), vec!["Home › Cabelos › Máscaras"]);
    }
}
