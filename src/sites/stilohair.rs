//! StiloHair marketplace (stilohair.com.br)

use scraper::Html;
use url::Url;

use super::listing::{walk_listing, ListingPage};
use super::page::{labelled_brand, CoreFields, ProductPage, INGREDIENT_LABELS, USAGE_LABELS};
use super::SiteContext;
use crate::error::Result;
use crate::extractors::{
    first_matching, first_text, long_paragraph, next_by_text, pick_text, rel_next, resolve_all,
    select_all,
};
use crate::record::ProductRecord;
use crate::text::extract_section;

const LISTING_SELECTORS: &[&str] = &[
    "a.product-name",
    "a.nome_produto",
    "a.nome-produto",
    "div.product-name a",
    "h2.product-name a",
    "h2.nome-produto a",
    "div.product-item a",
];

/// href fragments that mark a product link when no selector matches
const PRODUCT_HREF_HINTS: &[&str] = &[
    "/escova-",
    "/produto",
    "/produtos",
    "progressiva",
    "shampoo",
    "mascara",
    "máscara",
];

const DESCRIPTION_SELECTORS: &[&str] =
    &["div.product-description", "div.descricao", "div#descricao"];

pub(crate) const DEFAULT_BRAND: &str = "StiloHair";

fn harvest(document: &Html, base: &Url) -> ListingPage {
    let mut anchors = first_matching(document, LISTING_SELECTORS);
    if anchors.is_empty() {
        anchors = select_all(document, "a[href]")
            .into_iter()
            .filter(|a| {
                a.value()
                    .attr("href")
                    .is_some_and(|href| PRODUCT_HREF_HINTS.iter().any(|hint| href.contains(hint)))
            })
            .collect();
    }

    ListingPage {
        products: resolve_all(base, &anchors),
        next: rel_next(document, base)
            .or_else(|| next_by_text(document, base))
            .into_iter()
            .collect(),
    }
}

pub(crate) fn discover_links(ctx: &SiteContext<'_>, start_url: &str) -> Vec<String> {
    walk_listing(ctx, start_url, None, harvest)
}

pub(crate) fn parse_product(
    ctx: &SiteContext<'_>,
    product_url: &str,
) -> Result<Option<ProductRecord>> {
    let Some(page) = ProductPage::load(ctx, product_url)? else {
        return Ok(None);
    };

    let name = first_text(&page.document, "h1")
        .or_else(|| first_text(&page.document, "h2"))
        .unwrap_or_default();

    let brand = match labelled_brand(&page.text) {
        Some(brand) => brand,
        None if page.text_lower().contains("1ka") => "1Ka Hair".to_string(),
        None => DEFAULT_BRAND.to_string(),
    };

    let description = pick_text(&page.document, DESCRIPTION_SELECTORS, 0)
        .or_else(|| long_paragraph(&page.document, 80, |_| true))
        .unwrap_or_default();

    let usage = extract_section(
        &page.text,
        USAGE_LABELS,
        &["Ingredientes", "Composição", "Produtos relacionados"],
        2000,
    );
    let ingredients_raw = extract_section(
        &page.text,
        INGREDIENT_LABELS,
        &["Modo de usar", "Modo de uso", "Como usar", "Produtos relacionados"],
        2000,
    );

    let fields = CoreFields {
        name,
        brand,
        description,
        usage,
        ingredients_raw,
        parser: "stilohair",
        ..CoreFields::default()
    };
    Ok(Some(page.into_record(ctx, fields)))
}
