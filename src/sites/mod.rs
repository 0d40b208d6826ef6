//! Site strategies: how to find product links on a brand listing and how
//! to read a single product page.
//!
//! Strategies are registered per domain in a `StrategyRegistry` built once
//! at start-up; unknown domains fall back to the generic heuristics.

mod aline;
mod generic;
mod listing;
mod page;
mod stilohair;

use std::collections::HashMap;

use tracing::info;
use url::Url;

use crate::config::CrawlConfig;
use crate::error::Result;
use crate::fetch::{PageSource, Throttle};
use crate::record::ProductRecord;

/// Registry key of the fallback strategy
pub const FALLBACK_KEY: &str = "*";

/// What a strategy needs to talk to the outside world
pub struct SiteContext<'a> {
    pub source: &'a dyn PageSource,
    pub throttle: &'a Throttle,
    pub config: &'a CrawlConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStrategy {
    StiloHair,
    AlineBrasil,
    Generic,
}

impl SiteStrategy {
    pub fn name(self) -> &'static str {
        match self {
            SiteStrategy::StiloHair => "stilohair",
            SiteStrategy::AlineBrasil => "aline_brasil",
            SiteStrategy::Generic => "generic",
        }
    }

    /// Product URLs reachable from a brand listing, in discovery order.
    pub fn discover_links(self, ctx: &SiteContext<'_>, start_url: &str) -> Vec<String> {
        match self {
            SiteStrategy::StiloHair => stilohair::discover_links(ctx, start_url),
            SiteStrategy::AlineBrasil => aline::discover_links(ctx, start_url),
            SiteStrategy::Generic => generic::discover_links(ctx, start_url),
        }
    }

    /// `Ok(None)` when the page could not be fetched.
    pub fn parse_product(
        self,
        ctx: &SiteContext<'_>,
        product_url: &str,
    ) -> Result<Option<ProductRecord>> {
        match self {
            SiteStrategy::StiloHair => stilohair::parse_product(ctx, product_url),
            SiteStrategy::AlineBrasil => aline::parse_product(ctx, product_url),
            SiteStrategy::Generic => generic::parse_product(ctx, product_url),
        }
    }
}

/// Host of `url` (with port, if any) without scheme or a leading "www."
pub fn registrable_domain(url: &str) -> String {
    let host = match Url::parse(url.trim()) {
        Ok(parsed) => match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => String::new(),
        },
        Err(_) => {
            let rest = url.trim().split_once("://").map_or(url.trim(), |(_, rest)| rest);
            rest.split(&['/', '?', '#'][..]).next().unwrap_or("").to_lowercase()
        }
    };
    host.strip_prefix("www.").map(String::from).unwrap_or(host)
}

/// Domain → strategy mapping with a reserved fallback entry
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: HashMap<String, SiteStrategy>,
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("stilohair.com.br", SiteStrategy::StiloHair);
        registry.register("alinebrasilcosmetics.com.br", SiteStrategy::AlineBrasil);
        registry
    }
}

impl StrategyRegistry {
    /// Only the generic fallback
    pub fn empty() -> Self {
        let mut strategies = HashMap::new();
        strategies.insert(FALLBACK_KEY.to_string(), SiteStrategy::Generic);
        Self { strategies }
    }

    pub fn register(&mut self, domain: &str, strategy: SiteStrategy) {
        let key = if domain == FALLBACK_KEY {
            domain.to_string()
        } else {
            registrable_domain(domain)
        };
        self.strategies.insert(key, strategy);
    }

    /// Exact domain match, else the fallback.
    pub fn resolve(&self, brand_url: &str) -> SiteStrategy {
        let domain = registrable_domain(brand_url);
        if let Some(strategy) = self.strategies.get(&domain) {
            return *strategy;
        }
        info!(domain = %domain, "no site strategy registered, using fallback");
        self.strategies
            .get(FALLBACK_KEY)
            .copied()
            .unwrap_or(SiteStrategy::Generic)
    }
}
