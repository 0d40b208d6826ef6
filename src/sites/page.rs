//! A fetched product page and the field inference every strategy shares

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use url::Url;

use super::SiteContext;
use crate::claims::{build_corpus, detect_claims};
use crate::error::{Result, ScrapeError};
use crate::extractors::{
    breadcrumbs, collect_image_urls, front_and_back, image_metadata, resolve_href, visible_text,
};
use crate::ingredients::{classify_schedule, score_fine_hair, IngredientList};
use crate::record::ProductRecord;
use crate::text::{extract_audience, extract_hair_type, extract_ph, infer_product_type};

/// Labels that open the usage section on Brazilian stores
pub(crate) const USAGE_LABELS: &[&str] = &["Modo de usar", "Modo de uso", "Como usar"];

/// Labels that open the ingredient section
pub(crate) const INGREDIENT_LABELS: &[&str] = &["Ingredientes", "Composição"];

static BRAND_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Marca:\s*([^\n\r]+)").unwrap());

/// Brand written as a "Marca: ..." line in the page text
pub(crate) fn labelled_brand(text: &str) -> Option<String> {
    BRAND_LINE_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

pub(crate) struct ProductPage {
    /// The URL as discovered, kept verbatim for the record
    pub source_url: String,
    pub url: Url,
    pub document: Html,
    /// Visible text, newline-joined
    pub text: String,
}

impl ProductPage {
    /// `Ok(None)` when the page could not be fetched.
    pub fn load(ctx: &SiteContext<'_>, product_url: &str) -> Result<Option<Self>> {
        let url = Url::parse(product_url).map_err(|source| ScrapeError::InvalidUrl {
            url: product_url.to_string(),
            source,
        })?;
        let Some(html) = ctx.source.fetch(product_url) else {
            return Ok(None);
        };

        let document = Html::parse_document(&html);
        let text = visible_text(&document);
        Ok(Some(Self {
            source_url: product_url.to_string(),
            url,
            document,
            text,
        }))
    }

    pub fn text_lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Derive every inferred field and build the record.
    pub fn into_record(self, ctx: &SiteContext<'_>, fields: CoreFields) -> ProductRecord {
        let ingredients_raw = fields.ingredients_raw.replace('\n', " ").trim().to_string();
        let ingredients = IngredientList::parse(&ingredients_raw);

        let hair_type = if fields.description.is_empty() {
            extract_hair_type(&self.text)
        } else {
            extract_hair_type(&fields.description)
        };

        let mut images = collect_image_urls(&self.document, &self.url);
        if images.is_empty() {
            images = fields
                .fallback_images
                .iter()
                .filter_map(|src| resolve_href(&self.url, src))
                .collect();
        }
        let (image_front_url, image_back_url) = front_and_back(&images);

        let product_type = infer_product_type(&fields.name, &breadcrumbs(&self.document));
        let schedule = classify_schedule(&ingredients);
        let fine_hair = score_fine_hair(&ingredients, product_type);

        let claim_text = format!("{}\n{}", self.text, ingredients_raw);
        let corpus = build_corpus(&claim_text, &image_metadata(&self.document));
        let claims = detect_claims(&ctx.config.claims, &corpus);

        ProductRecord {
            source_url: self.source_url,
            brand: fields.brand,
            product_name: fields.name,
            product_type: product_type.to_string(),
            description: fields.description,
            hair_type_declared: hair_type.to_string(),
            usage_instructions: fields.usage,
            ingredients_raw,
            ingredients,
            image_front_url,
            image_back_url,
            ph: extract_ph(&self.text),
            target_audience: extract_audience(&self.text).to_string(),
            schedule,
            fine_hair,
            claims,
            parser: fields.parser.to_string(),
        }
    }
}

/// Fields each strategy extracts its own way
#[derive(Debug, Default)]
pub(crate) struct CoreFields {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub usage: String,
    pub ingredients_raw: String,
    pub parser: &'static str,
    /// Image URLs from page metadata, used when the page shows no images
    pub fallback_images: Vec<String>,
}
