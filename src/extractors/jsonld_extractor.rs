//! JSON-LD extraction from HTML
//!
//! Finds the schema.org `Product` object in <script type="application/ld+json">
//! tags. Supports @graph arrays and multiple JSON-LD blocks.

use scraper::Html;
use serde_json::Value;

use super::css_extractor::select_all;
use crate::text::normalize_space;

/// Fields of the first JSON-LD `Product` on the page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonLdProduct {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
}

pub fn extract_product_jsonld(document: &Html) -> Option<JsonLdProduct> {
    select_all(document, r#"script[type="application/ld+json"]"#)
        .into_iter()
        .filter_map(|element| {
            let content = element.inner_html();
            serde_json::from_str::<Value>(content.trim()).ok()
        })
        .find_map(|json| find_product(&json).map(product_fields))
}

fn find_product(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(arr) => arr.iter().find_map(find_product),
        Value::Object(obj) => {
            if let Some(Value::Array(graph)) = obj.get("@graph") {
                if let Some(found) = graph.iter().find_map(find_product) {
                    return Some(found);
                }
            }
            is_product(value).then_some(value)
        }
        _ => None,
    }
}

fn is_product(value: &Value) -> bool {
    let is_product_type = |t: &str| {
        t.strip_prefix("https://schema.org/")
            .or_else(|| t.strip_prefix("http://schema.org/"))
            .unwrap_or(t)
            == "Product"
    };

    match value.get("@type") {
        Some(Value::String(s)) => is_product_type(s),
        Some(Value::Array(arr)) => arr.iter().filter_map(Value::as_str).any(is_product_type),
        _ => false,
    }
}

fn product_fields(product: &Value) -> JsonLdProduct {
    JsonLdProduct {
        name: text_field(product.get("name")),
        brand: product.get("brand").and_then(|brand| match brand {
            Value::Object(_) => text_field(brand.get("name")),
            other => text_field(Some(other)),
        }),
        description: text_field(product.get("description")),
        images: match product.get("image") {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(arr)) => arr.iter().filter_map(image_url).collect(),
            Some(obj @ Value::Object(_)) => image_url(obj).into_iter().collect(),
            _ => vec![],
        },
    }
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("url")
            .or_else(|| obj.get("contentUrl"))
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    let text = normalize_space(value?.as_str()?);
    (!text.is_empty()).then_some(text)
}
