//! Heuristic strategy for stores without a dedicated one
//!
//! Link discovery tries the selector families of the common Brazilian
//! e-commerce platforms, then product-looking URL patterns, then anchors
//! inside product containers. Candidates must stay on the brand's host and
//! pass the deny-list.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use url::Url;

use super::listing::{walk_listing, ListingPage};
use super::page::{CoreFields, ProductPage};
use super::{registrable_domain, SiteContext};
use crate::error::Result;
use crate::extractors::{
    extract_links, extract_opengraph, extract_product_jsonld, first_matching, first_text,
    long_paragraph, next_by_text, pick_text, resolve_all, select_all,
};
use crate::record::ProductRecord;
use crate::text::{extract_section, normalize_space, title_case};

const PRODUCT_SELECTORS: &[&str] = &[
    // WooCommerce
    "ul.products li.product a",
    "li.product a.woocommerce-LoopProduct-link",
    // Shopify
    ".product-card a",
    ".product-item a",
    ".product-grid-item a",
    // VTEX
    ".shelf-item a",
    ".prateleira a",
    // Tray / Loja Integrada
    "div.product-name a",
    "h2.product-name a",
    ".product-box a",
    ".produto a",
    ".product a",
    ".products a",
    "[data-product] a",
    ".card-product a",
    ".item-product a",
];

const CONTAINER_SELECTOR: &str =
    "div[class*='product'] a[href], div[class*='produto'] a[href], article[class*='product'] a[href]";

const PAGINATION_SELECTORS: &[&str] = &[
    "a.next",
    "a.page-numbers.next",
    "a[rel='next']",
    "link[rel='next']",
    ".pagination a",
    ".paginacao a",
];

static PRODUCT_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"/produto/|/product/|/produtos/|/products/|/item/|/p/|/loja/|/shop/|-p-\d+|/dp/|\.html$",
    )
    .unwrap()
});

static IGNORED_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"/carrinho|/cart|/login|/cadastro|/register|/contato|/contact|/sobre|/about|",
        r"/politica|/termos|/faq|/ajuda|/help|facebook\.com|instagram\.com|twitter\.com|",
        r"youtube\.com|whatsapp|/checkout|/minha-conta|/account|/wishlist|/blog/|",
        r"/categoria/|/category/|/brand/|/marca/",
    ))
    .unwrap()
});

const NAME_SELECTORS: &[&str] = &[
    "h1.product-title",
    "h1.product_title",
    "h1.product-name",
    "h1[itemprop='name']",
    ".product-name h1",
    ".product-title",
    "h1.entry-title",
    "h1.nome-produto",
    "h1.productName",
    "h1",
    "h2.product-name",
];

const BRAND_SELECTORS: &[&str] = &[
    "[itemprop='brand']",
    ".product-brand",
    ".brand",
    "a[href*='/marca/']",
    "a[href*='/brand/']",
    ".manufacturer",
    "[data-brand]",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "[itemprop='description']",
    ".product-description",
    "#description",
    ".description",
    ".descricao",
    "#tab-description",
    ".woocommerce-product-details__short-description",
    ".product-info",
    ".product-details",
    ".sobre-produto",
];

const INGREDIENT_SELECTORS: &[&str] = &[
    "#ingredientes",
    ".ingredientes",
    "[data-ingredientes]",
    "#ingredients",
    ".ingredients",
    "[itemprop='ingredients']",
    ".composicao",
    "#composicao",
    ".composition",
];

const INGREDIENT_LABELS: &[&str] = &[
    "Ingredientes:",
    "Ingredientes",
    "Composição:",
    "Composição",
    "INCI:",
    "INCI",
    "Ingredients:",
    "Composition:",
];

const INGREDIENT_STOPS: &[&str] = &[
    "Modo de usar",
    "Modo de uso",
    "Como usar",
    "Precauções",
    "Cuidados",
    "Informações",
    "Avaliações",
];

const USAGE_LABELS: &[&str] = &[
    "Modo de usar",
    "Modo de uso",
    "Como usar",
    "Modo de aplicação",
    "Instruções de uso",
    "How to use",
    "Aplicação",
];

const USAGE_STOPS: &[&str] = &["Ingredientes", "Composição", "Precauções", "Advertências"];

static BRAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Marca|Brand)[:\s]+([^\n\r,]+)").unwrap());

static INGREDIENT_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ingredientes|composição|inci|ingredients|composition)[:\s]*").unwrap()
});

fn is_ignored(url: &str) -> bool {
    IGNORED_URL_RE.is_match(&url.to_lowercase())
}

fn harvest(document: &Html, base: &Url, brand_host: &str) -> ListingPage {
    let mut anchors = first_matching(document, PRODUCT_SELECTORS);
    if anchors.is_empty() {
        anchors = select_all(document, "a[href]")
            .into_iter()
            .filter(|a| {
                a.value().attr("href").is_some_and(|href| {
                    let href = href.to_lowercase();
                    !IGNORED_URL_RE.is_match(&href) && PRODUCT_URL_RE.is_match(&href)
                })
            })
            .collect();
    }
    if anchors.is_empty() {
        anchors = select_all(document, CONTAINER_SELECTOR);
    }

    let products = resolve_all(base, &anchors)
        .into_iter()
        .filter(|url| {
            Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.contains(brand_host)))
                .unwrap_or(false)
        })
        .filter(|url| !is_ignored(url))
        .collect();

    let mut next: Vec<String> = PAGINATION_SELECTORS
        .iter()
        .filter_map(|sel| extract_links(document, sel, base).into_iter().next())
        .collect();
    next.extend(next_by_text(document, base));

    ListingPage { products, next }
}

pub(crate) fn discover_links(ctx: &SiteContext<'_>, start_url: &str) -> Vec<String> {
    let brand_host = Url::parse(start_url)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
        .unwrap_or_default();

    let max_pages = ctx.config.generic_max_pages;
    let found = walk_listing(ctx, start_url, Some(max_pages), |document, base| {
        harvest(document, base, &brand_host)
    });

    let mut seen = HashSet::new();
    found
        .into_iter()
        .filter(|link| {
            let normalized = link.trim_end_matches('/');
            normalized.chars().count() > ctx.config.generic_min_url_len
                && seen.insert(normalized.to_string())
        })
        .take(ctx.config.generic_max_links)
        .collect()
}

/// `<title>` up to the first "|" and then the first "-"
fn title_prefix(document: &Html) -> Option<String> {
    let title = first_text(document, "title")?;
    let head = title.split('|').next().unwrap_or("");
    let head = head.split('-').next().unwrap_or("");
    Some(normalize_space(head)).filter(|s| !s.is_empty())
}

fn brand_from_domain(url: &str) -> String {
    let domain = registrable_domain(url)
        .replace(".com.br", "")
        .replace(".com", "");
    title_case(&domain)
}

pub(crate) fn parse_product(
    ctx: &SiteContext<'_>,
    product_url: &str,
) -> Result<Option<ProductRecord>> {
    let Some(page) = ProductPage::load(ctx, product_url)? else {
        return Ok(None);
    };
    let og = extract_opengraph(&page.document);
    let jsonld = extract_product_jsonld(&page.document).unwrap_or_default();

    let name = pick_text(&page.document, NAME_SELECTORS, 5)
        .or_else(|| og.title.clone())
        .or_else(|| jsonld.name.clone())
        .or_else(|| title_prefix(&page.document))
        .or_else(|| pick_text(&page.document, NAME_SELECTORS, 0))
        .unwrap_or_default();

    let brand = pick_text(&page.document, BRAND_SELECTORS, 0)
        .or_else(|| jsonld.brand.clone())
        .or_else(|| {
            BRAND_RE
                .captures(&page.text)
                .map(|caps| caps[1].trim().to_string())
                .filter(|b| !b.is_empty())
        })
        .unwrap_or_else(|| brand_from_domain(product_url));

    let description = pick_text(&page.document, DESCRIPTION_SELECTORS, 50)
        .or_else(|| {
            long_paragraph(&page.document, 100, |text| {
                !text.to_lowercase().contains("cookie")
            })
        })
        .or_else(|| og.description.clone())
        .or_else(|| jsonld.description.clone())
        .or_else(|| pick_text(&page.document, DESCRIPTION_SELECTORS, 0))
        .unwrap_or_default();

    let ingredients_raw = pick_text(&page.document, INGREDIENT_SELECTORS, 0).unwrap_or_else(|| {
        extract_section(&page.text, INGREDIENT_LABELS, INGREDIENT_STOPS, 3000)
    });
    let ingredients_raw = ingredients_raw.replace('\n', " ");
    let ingredients_raw = INGREDIENT_PREFIX_RE
        .replace(ingredients_raw.trim(), "")
        .into_owned();

    let usage = extract_section(&page.text, USAGE_LABELS, USAGE_STOPS, 2000);

    let fields = CoreFields {
        name,
        brand,
        description,
        usage,
        ingredients_raw,
        parser: "generic",
        fallback_images: if og.images.is_empty() {
            jsonld.images
        } else {
            og.images
        },
    };
    Ok(Some(page.into_record(ctx, fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlConfig;
    use crate::fetch::testing::StaticPages;
    use crate::fetch::Throttle;

    const BRAND: &str = "https://www.lojacapilar.com.br/marcas/exemplo";

    fn discover(pages: &StaticPages, config: &CrawlConfig) -> Vec<String> {
        let throttle = Throttle::disabled();
        let ctx = SiteContext {
            source: pages,
            throttle: &throttle,
            config,
        };
        discover_links(&ctx, BRAND)
    }

    #[test]
    fn test_url_pattern_fallback_and_deny_list() {
        let html = r#"
        <html><body>
            <a href="/produto/shampoo-detox">Shampoo</a>
            <a href="/produto/shampoo-detox/">Shampoo (de novo)</a>
            <a href="/loja/cart">Carrinho</a>
            <a href="https://facebook.com/produto/x">Facebook</a>
            <a href="https://www.outraloja.com.br/produto/y">Outra loja</a>
            <a href="/condicionador-detox.html">Condicionador</a>
            <a href="/institucional">Institucional</a>
        </body></html>
        "#;
        let pages = StaticPages::new().with(BRAND, html);

        let links = discover(&pages, &CrawlConfig::default());
        assert_eq!(
            links,
            vec![
                "https://www.lojacapilar.com.br/produto/shampoo-detox",
                "https://www.lojacapilar.com.br/condicionador-detox.html",
            ]
        );
        // no selectors and no next link: exactly one listing fetch
        assert_eq!(pages.requested(), vec![BRAND]);
    }

    #[test]
    fn test_container_fallback() {
        let html = r#"
        <html><body>
            <div class="vitrine-produto-card">
                <a href="/kit-verao-cachos-completo">Kit Verão</a>
            </div>
            <a href="/institucional">Institucional</a>
        </body></html>
        "#;
        let pages = StaticPages::new().with(BRAND, html);

        assert_eq!(
            discover(&pages, &CrawlConfig::default()),
            vec!["https://www.lojacapilar.com.br/kit-verao-cachos-completo"]
        );
    }

    fn paginated_pages() -> StaticPages {
        let page = |n: u32| {
            format!(
                r#"<html><body>
                <div class="product-card"><a href="/produto/item-numero-{n}">Item {n}</a></div>
                <a class="next" href="?page={}">Próxima</a>
                </body></html>"#,
                n + 1
            )
        };
        StaticPages::new()
            .with(BRAND, &page(1))
            .with(&format!("{BRAND}?page=2"), &page(2))
            .with(&format!("{BRAND}?page=3"), &page(3))
    }

    #[test]
    fn test_page_cap() {
        let pages = paginated_pages();
        let config = CrawlConfig {
            generic_max_pages: 2,
            ..CrawlConfig::default()
        };

        let links = discover(&pages, &config);
        assert_eq!(
            links,
            vec![
                "https://www.lojacapilar.com.br/produto/item-numero-1",
                "https://www.lojacapilar.com.br/produto/item-numero-2",
            ]
        );
        assert_eq!(pages.requested().len(), 2);
    }

    #[test]
    fn test_link_cap_and_min_length() {
        let pages = paginated_pages();
        let config = CrawlConfig {
            generic_max_links: 1,
            ..CrawlConfig::default()
        };
        assert_eq!(
            discover(&pages, &config),
            vec!["https://www.lojacapilar.com.br/produto/item-numero-1"]
        );

        let pages = paginated_pages();
        let config = CrawlConfig {
            generic_min_url_len: 200,
            ..CrawlConfig::default()
        };
        assert!(discover(&pages, &config).is_empty());
    }

    fn parse(url: &str, html: &str) -> ProductRecord {
        let pages = StaticPages::new().with(url, html);
        let config = CrawlConfig::default();
        let throttle = Throttle::disabled();
        let ctx = SiteContext {
            source: &pages,
            throttle: &throttle,
            config: &config,
        };
        parse_product(&ctx, url).unwrap().unwrap()
    }

    #[test]
    fn test_parse_structured_fallbacks() {
        let html = r#"
        <html><head>
            <title>Shampoo Antirresíduo | Loja Capilar</title>
            <meta property="og:description" content="Limpeza profunda para cabelos oleosos.">
            <meta property="og:image" content="/media/shampoo-antirresiduo.jpg">
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "Product",
             "name": "Shampoo Antirresíduo 300ml",
             "brand": {"@type": "Brand", "name": "Marca Teste"}}
            </script>
        </head><body>
            <div class="ingredientes">Ingredients: Aqua, Sodium Laureth Sulfate, Glycerin</div>
            <p>Aceite os cookies para continuar navegando neste site e aproveitar todas as funcionalidades disponíveis para você.</p>
            <div class="modo">Como usar: aplique no couro cabeludo úmido e enxágue.</div>
        </body></html>
        "#;
        let record = parse("https://www.lojacapilar.com.br/produto/shampoo-antirresiduo", html);

        assert_eq!(record.product_name, "Shampoo Antirresíduo 300ml");
        assert_eq!(record.brand, "Marca Teste");
        assert_eq!(record.description, "Limpeza profunda para cabelos oleosos.");
        assert_eq!(record.hair_type_declared, "Oily/Fine");
        assert_eq!(record.ingredients_raw, "Aqua, Sodium Laureth Sulfate, Glycerin");
        assert_eq!(
            record.ingredients.as_slice(),
            &["aqua", "sodium laureth sulfate", "glycerin"]
        );
        assert_eq!(
            record.usage_instructions,
            "Como usar: aplique no couro cabeludo úmido e enxágue."
        );
        assert_eq!(record.product_type, "Shampoo");
        assert_eq!(
            record.image_front_url,
            "https://www.lojacapilar.com.br/media/shampoo-antirresiduo.jpg"
        );
        assert_eq!(record.image_back_url, "");
        assert_eq!(record.parser, "generic");
    }

    #[test]
    fn test_parse_title_and_domain_brand() {
        let html = r#"
        <html><head><title>Máscara Reconstrutora - Beleza Natural</title></head>
        <body><h1>Oi</h1><p>Texto curto.</p></body></html>
        "#;
        let record = parse("https://www.belezanatural.com.br/produto/mascara-reconstrutora", html);

        assert_eq!(record.product_name, "Máscara Reconstrutora");
        assert_eq!(record.brand, "Belezanatural");
        assert_eq!(record.description, "");
        assert!(record.ingredients.is_empty());
        assert_eq!(record.product_type, "Mask");
    }

    #[test]
    fn test_parse_invalid_url_is_error() {
        let pages = StaticPages::new();
        let config = CrawlConfig::default();
        let throttle = Throttle::disabled();
        let ctx = SiteContext {
            source: &pages,
            throttle: &throttle,
            config: &config,
        };

        let err = parse_product(&ctx, "not a url").unwrap_err();
        assert!(matches!(err, crate::error::ScrapeError::InvalidUrl { .. }));
        assert!(pages.requested().is_empty());
    }

    #[test]
    fn test_brand_from_domain() {
        assert_eq!(brand_from_domain("https://www.minha-loja.com/p/1"), "Minha-Loja");
        assert_eq!(brand_from_domain("https://cachos.com.br/"), "Cachos");
    }
}
