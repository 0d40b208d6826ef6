//! Brand seed list: one URL per line

use std::path::Path;

use crate::error::{Result, ScrapeError};

/// Used when no seed file is available
pub const EXAMPLE_BRAND_URLS: &[&str] = &[
    "https://www.stilohair.com.br/marca/1ka-hair.html",
    "https://alinebrasilcosmetics.com.br/loja/",
];

/// Seed URLs in file order. Blank lines and `#` comments are skipped; on
/// tab-separated lines only the last field counts; anything not starting
/// with "http" is dropped.
pub fn parse_seed_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.rsplit('\t').next())
        .map(str::trim)
        .filter(|url| url.starts_with("http"))
        .map(String::from)
        .collect()
}

pub fn load_seed_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| ScrapeError::io(path, e))?;
    Ok(parse_seed_list(&text))
}

pub fn example_brand_urls() -> Vec<String> {
    EXAMPLE_BRAND_URLS.iter().map(|s| s.to_string()).collect()
}
