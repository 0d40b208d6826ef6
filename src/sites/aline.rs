//! Aline Brasil Cosmetics store (WooCommerce)

use scraper::Html;
use url::Url;

use super::listing::{walk_listing, ListingPage};
use super::page::{labelled_brand, CoreFields, ProductPage, INGREDIENT_LABELS, USAGE_LABELS};
use super::SiteContext;
use crate::error::Result;
use crate::extractors::{
    extract_links, first_matching, first_text, long_paragraph, next_by_text, pick_text, rel_next,
    resolve_all, select_all,
};
use crate::record::ProductRecord;
use crate::text::extract_section;

const LISTING_SELECTORS: &[&str] = &[
    "ul.products li.product a.woocommerce-LoopProduct-link",
    "li.product a.woocommerce-LoopProduct-link",
    "a.woocommerce-LoopProduct-link",
    "h2.woocommerce-loop-product__title a",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "div.woocommerce-product-details__short-description",
    "div#tab-description",
    "div.product-description",
];

pub(crate) const DEFAULT_BRAND: &str = "Aline Brasil Cosmetics";

fn harvest(document: &Html, base: &Url) -> ListingPage {
    let mut anchors = first_matching(document, LISTING_SELECTORS);
    if anchors.is_empty() {
        anchors = select_all(document, "li.product a[href]");
    }
    if anchors.is_empty() {
        anchors = select_all(document, "a[href]")
            .into_iter()
            .filter(|a| {
                a.value()
                    .attr("href")
                    .is_some_and(|href| href.contains("/produto/") || href.contains("/product/"))
            })
            .collect();
    }

    let next = extract_links(document, "a.page-numbers.next", base)
        .into_iter()
        .next()
        .or_else(|| rel_next(document, base))
        .or_else(|| next_by_text(document, base));

    ListingPage {
        products: resolve_all(base, &anchors),
        next: next.into_iter().collect(),
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

    let name = first_text(&page.document, "h1.product_title")
        .or_else(|| first_text(&page.document, "h1"))
        .unwrap_or_default();

    let brand = labelled_brand(&page.text).unwrap_or_else(|| DEFAULT_BRAND.to_string());

    let description = pick_text(&page.document, DESCRIPTION_SELECTORS, 0)
        .or_else(|| long_paragraph(&page.document, 80, |_| true))
        .unwrap_or_default();

    let ingredients_raw = extract_section(&page.text, INGREDIENT_LABELS, USAGE_LABELS, 2000);
    let usage = extract_section(&page.text, USAGE_LABELS, INGREDIENT_LABELS, 2000);

    let fields = CoreFields {
        name,
        brand,
        description,
        usage,
        ingredients_raw,
        parser: "aline_brasil",
        ..CoreFields::default()
    };
    Ok(Some(page.into_record(ctx, fields)))
}
