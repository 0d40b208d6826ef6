use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hair_scraper::config::CrawlConfig;
use hair_scraper::crawl::Crawler;
use hair_scraper::fetch::{HttpClient, Throttle};
use hair_scraper::{output, seeds};

/// Crawl hair-care brand stores and export a classified product table
#[derive(Parser, Debug)]
#[command(name = "hair-scraper", version, about)]
struct Args {
    /// Brand URLs, one per line
    #[arg(default_value = "brand_urls.txt")]
    seeds: PathBuf,

    /// CSV output; the JSON export is written next to it
    #[arg(short, long, default_value = "hair_products.csv")]
    output: PathBuf,

    /// JSON file overriding crawl settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Crawl at most this many brands
    #[arg(long)]
    limit: Option<usize>,
}

fn load_config(path: Option<&Path>) -> CrawlConfig {
    let Some(path) = path else {
        return CrawlConfig::default();
    };
    match CrawlConfig::from_json_file(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config not usable, using defaults");
            CrawlConfig::default()
        }
    }
}

fn load_brand_urls(path: &Path) -> Vec<String> {
    match seeds::load_seed_file(path) {
        Ok(urls) => {
            info!(path = %path.display(), brands = urls.len(), "seed file loaded");
            urls
        }
        Err(e) => {
            error!(error = %e, "seed file unreadable, using the example brand list");
            seeds::example_brand_urls()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref());

    let mut brand_urls = load_brand_urls(&args.seeds);
    if let Some(limit) = args.limit {
        brand_urls.truncate(limit);
    }

    let client = HttpClient::new(&config);
    let throttle = Throttle::from_config(&config);
    let crawler = Crawler::new(&client, &throttle, &config);

    let records = crawler.run(&brand_urls);
    output::export(&records, &args.output)?;
    Ok(())
}
