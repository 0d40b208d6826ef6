//! Brand-by-brand, product-by-product crawl loop

use tracing::{error, info, warn};

use crate::config::CrawlConfig;
use crate::fetch::{PageSource, Throttle};
use crate::record::ProductRecord;
use crate::sites::{SiteContext, SiteStrategy, StrategyRegistry};

pub struct Crawler<'a> {
    registry: StrategyRegistry,
    ctx: SiteContext<'a>,
}

impl<'a> Crawler<'a> {
    /// Crawler with the built-in site strategies.
    pub fn new(source: &'a dyn PageSource, throttle: &'a Throttle, config: &'a CrawlConfig) -> Self {
        Self {
            registry: StrategyRegistry::default(),
            ctx: SiteContext {
                source,
                throttle,
                config,
            },
        }
    }

    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Every product reachable from one brand page. Products that fail to
    /// parse are logged and left out.
    pub fn crawl_brand(&self, brand_url: &str) -> Vec<ProductRecord> {
        let strategy = self.registry.resolve(brand_url);
        info!(url = brand_url, strategy = strategy.name(), "crawling brand");

        let links = strategy.discover_links(&self.ctx, brand_url);
        info!(url = brand_url, products = links.len(), "product links found");

        self.crawl_products(strategy, &links)
    }

    /// Parse `links` in order with `strategy`, pausing between products.
    pub fn crawl_products(&self, strategy: SiteStrategy, links: &[String]) -> Vec<ProductRecord> {
        let mut records = Vec::new();
        for (idx, product_url) in links.iter().enumerate() {
            if idx > 0 {
                self.ctx.throttle.pause();
            }
            info!(
                n = idx + 1,
                total = links.len(),
                url = %product_url,
                "parsing product"
            );
            match strategy.parse_product(&self.ctx, product_url) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => error!(url = %product_url, error = %e, "failed to parse product"),
            }
        }
        records
    }

    /// Crawl every brand in order and concatenate the records.
    pub fn run<S: AsRef<str>>(&self, brand_urls: &[S]) -> Vec<ProductRecord> {
        let mut all = Vec::new();
        for brand_url in brand_urls {
            let records = self.crawl_brand(brand_url.as_ref());
            info!(url = brand_url.as_ref(), records = records.len(), "brand done");
            all.extend(records);
        }

        if all.is_empty() {
            warn!("no products collected");
        } else {
            info!(records = all.len(), "crawl finished");
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticPages;

    const ALINE_SHOP: &str = "https://alinebrasilcosmetics.com.br/loja/";

    fn aline_pages() -> StaticPages {
        let listing = r#"
        <html><body><ul class="products">
            <li class="product"><a class="woocommerce-LoopProduct-link" href="/produto/shampoo/">Shampoo</a></li>
            <li class="product"><a class="woocommerce-LoopProduct-link" href="/produto/sumiu/">Sumiu</a></li>
            <li class="product"><a class="woocommerce-LoopProduct-link" href="/produto/mascara/">Máscara</a></li>
        </ul></body></html>
        "#;
        StaticPages::new()
            .with(ALINE_SHOP, listing)
            .with(
                "https://alinebrasilcosmetics.com.br/produto/shampoo/",
                "<html><body><h1 class=\"product_title\">Shampoo Hidratante</h1></body></html>",
            )
            .with(
                "https://alinebrasilcosmetics.com.br/produto/mascara/",
                "<html><body><h1 class=\"product_title\">Máscara Nutritiva</h1></body></html>",
            )
    }

    #[test]
    fn test_run_skips_unfetchable_products() {
        let pages = aline_pages();
        let config = CrawlConfig::default();
        let throttle = Throttle::disabled();
        let crawler = Crawler::new(&pages, &throttle, &config);

        let records = crawler.run(&[ALINE_SHOP]);
        let names: Vec<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Shampoo Hidratante", "Máscara Nutritiva"]);
        assert!(records.iter().all(|r| r.parser == "aline_brasil"));
        assert_eq!(
            pages.requested(),
            vec![
                ALINE_SHOP,
                "https://alinebrasilcosmetics.com.br/produto/shampoo/",
                "https://alinebrasilcosmetics.com.br/produto/sumiu/",
                "https://alinebrasilcosmetics.com.br/produto/mascara/",
            ]
        );
    }

    #[test]
    fn test_run_with_unreachable_brand_is_empty() {
        let pages = StaticPages::new();
        let config = CrawlConfig::default();
        let throttle = Throttle::disabled();
        let crawler = Crawler::new(&pages, &throttle, &config);

        assert!(crawler.run(&["https://www.naoexiste.com.br/"]).is_empty());
        assert_eq!(pages.requested(), vec!["https://www.naoexiste.com.br/"]);
    }

    #[test]
    fn test_custom_registry() {
        let pages = aline_pages();
        let config = CrawlConfig::default();
        let throttle = Throttle::disabled();

        let mut registry = StrategyRegistry::empty();
        registry.register(ALINE_SHOP, SiteStrategy::Generic);
        let crawler = Crawler::new(&pages, &throttle, &config).with_registry(registry);

        let records = crawler.crawl_brand(ALINE_SHOP);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.parser == "generic"));
    }

    #[test]
    fn test_failing_product_does_not_stop_the_loop() {
        let pages = aline_pages();
        let config = CrawlConfig::default();
        let throttle = Throttle::disabled();
        let crawler = Crawler::new(&pages, &throttle, &config);

        let links = vec![
            "https://alinebrasilcosmetics.com.br/produto/shampoo/".to_string(),
            "not a url".to_string(),
            "https://alinebrasilcosmetics.com.br/produto/mascara/".to_string(),
        ];
        let records = crawler.crawl_products(SiteStrategy::AlineBrasil, &links);

        let names: Vec<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Shampoo Hidratante", "Máscara Nutritiva"]);
        // the invalid URL fails before any fetch
        assert_eq!(
            pages.requested(),
            vec![
                "https://alinebrasilcosmetics.com.br/produto/shampoo/",
                "https://alinebrasilcosmetics.com.br/produto/mascara/",
            ]
        );
    }

    #[test]
    fn test_no_pause_after_last_product() {
        let pages = aline_pages();
        let config = CrawlConfig::default();
        let delay = std::time::Duration::from_millis(300);
        let throttle = Throttle::new(delay, delay);
        let crawler = Crawler::new(&pages, &throttle, &config);

        let links = vec!["https://alinebrasilcosmetics.com.br/produto/shampoo/".to_string()];
        let started = std::time::Instant::now();
        let records = crawler.crawl_products(SiteStrategy::AlineBrasil, &links);

        assert_eq!(records.len(), 1);
        assert!(started.elapsed() < delay);
    }
}
