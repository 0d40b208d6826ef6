//! Free-text helpers: whitespace normalization, labelled sections, pH,
//! target audience, declared hair type and product type.

use std::sync::LazyLock;

use regex::Regex;

static PH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pH\s*(\d{1,2}(?:[.,]\d)?)").unwrap());

/// Collapse every whitespace run into one space and trim.
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercased copy of a string that remembers where each lowercase byte
/// came from, so matches found case-insensitively slice the original.
struct Folded {
    lower: String,
    origin: Vec<usize>,
}

impl Folded {
    fn new(text: &str) -> Self {
        let mut lower = String::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len() + 1);
        for (idx, ch) in text.char_indices() {
            for lc in ch.to_lowercase() {
                let start = lower.len();
                lower.push(lc);
                origin.extend(std::iter::repeat(idx).take(lower.len() - start));
            }
        }
        origin.push(text.len());
        Self { lower, origin }
    }

    fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.lower
            .get(from..)?
            .find(&needle)
            .map(|pos| pos + from)
    }

    fn to_original(&self, pos: usize) -> usize {
        self.origin[pos]
    }
}

/// Slice of `full_text` starting at the earliest label candidate and ending
/// at the nearest stop marker after it, capped to `max_chars` characters.
/// Empty when no label occurs.
pub fn extract_section(
    full_text: &str,
    labels: &[&str],
    stop_markers: &[&str],
    max_chars: usize,
) -> String {
    if full_text.is_empty() {
        return String::new();
    }
    let folded = Folded::new(full_text);

    let Some((start, label_len)) = labels
        .iter()
        .filter_map(|label| {
            folded
                .find_from(label, 0)
                .map(|pos| (pos, label.to_lowercase().len()))
        })
        .min_by_key(|(pos, _)| *pos)
    else {
        return String::new();
    };

    let end = stop_markers
        .iter()
        .filter_map(|stop| folded.find_from(stop, start + label_len))
        .min()
        .unwrap_or(folded.lower.len());

    let section = &full_text[folded.to_original(start)..folded.to_original(end)];
    let section = match section.char_indices().nth(max_chars) {
        Some((cut, _)) => &section[..cut],
        None => section,
    };
    section.trim().to_string()
}

/// pH value written as "pH 5.5" / "ph5,5" anywhere in the text.
pub fn extract_ph(full_text: &str) -> Option<f64> {
    let caps = PH_RE.captures(full_text)?;
    caps[1].replace(',', ".").parse().ok()
}

const INFANT_TERMS: &[&str] = &["bebê", "bebe", "recém-nascido", "0+", "baby"];
const CHILD_TERMS: &[&str] = &["infantil", "criança", "crianca", "kid", "kids"];
const TEEN_TERMS: &[&str] = &["teen", "adolescente"];

/// Target audience by keyword cascade; empty text has no audience.
pub fn extract_audience(full_text: &str) -> &'static str {
    if full_text.is_empty() {
        return "";
    }
    let lower = full_text.to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

    if mentions(INFANT_TERMS) {
        "Infant (0-3)"
    } else if mentions(CHILD_TERMS) {
        "Child (3-12)"
    } else if mentions(TEEN_TERMS) {
        "Teen"
    } else {
        "Adult"
    }
}

const HAIR_TYPES: &[(&str, &str)] = &[
    ("cabelos cacheados", "Curly/Coily"),
    ("cabelos crespos", "Curly/Coily"),
    ("cabelos ondulados", "Wavy"),
    ("cabelos lisos", "Straight"),
    ("cabelos oleosos", "Oily/Fine"),
    ("couro cabeludo oleoso", "Oily/Fine"),
    ("cabelos mistos", "Combination"),
    ("cabelos secos", "Dry"),
    ("cabelos ressecados", "Dry"),
    ("cabelos danificados", "Damaged/Chemically treated"),
    ("cabelos quimicamente tratados", "Damaged/Chemically treated"),
    ("cabelos coloridos", "Colored/Chemically treated"),
    ("cabelos tingidos", "Colored/Chemically treated"),
    ("cabelos loiros", "Blonde"),
];

pub fn extract_hair_type(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    HAIR_TYPES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or("")
}

const PRODUCT_TYPES: &[(&str, &str)] = &[
    ("shampoo", "Shampoo"),
    ("condicionador", "Conditioner"),
    ("conditioner", "Conditioner"),
    ("máscara", "Mask"),
    ("mascara", "Mask"),
    ("mask", "Mask"),
    ("leave-in", "Leave-in"),
    ("leave in", "Leave-in"),
    ("óleo", "Oil"),
    ("oleo", "Oil"),
    ("spray", "Spray"),
    ("finalizador", "Styler"),
    ("tônico", "Tonic"),
    ("tonico", "Tonic"),
    ("ampola", "Ampoule"),
    ("serum", "Serum"),
    ("sérum", "Serum"),
];

/// Product type from the product name and breadcrumb text, "Other" if unknown.
pub fn infer_product_type(name: &str, breadcrumbs: &[String]) -> &'static str {
    let mut haystack = name.to_lowercase();
    for crumb in breadcrumbs {
        haystack.push(' ');
        haystack.push_str(&crumb.to_lowercase());
    }

    PRODUCT_TYPES
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or("Other")
}

/// Title case: uppercase after any non-alphabetic character.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if boundary {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(ch);
            boundary = true;
        }
    }
    out
}
