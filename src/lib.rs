//! Hair-care product crawler
//!
//! Walks brand listing pages of Brazilian e-commerce stores, parses each
//! product page and classifies its ingredient list:
//! - site strategies per domain, with a generic fallback
//! - hair-care schedule phase (hydration / nutrition / reconstruction)
//! - fine-hair suitability score
//! - marketing claim detection from page text and image metadata
//! - CSV and JSON export

pub mod claims;
pub mod config;
pub mod crawl;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod ingredients;
pub mod output;
pub mod record;
pub mod seeds;
pub mod sites;
pub mod text;

pub use claims::{ClaimDefinition, ClaimReport};
pub use config::CrawlConfig;
pub use crawl::Crawler;
pub use error::{Result, ScrapeError};
pub use ingredients::{classify_schedule, score_fine_hair, IngredientList};
pub use record::ProductRecord;
pub use sites::{SiteStrategy, StrategyRegistry};
