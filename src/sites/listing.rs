//! Paginated listing walk shared by every link-discovery strategy

use std::collections::HashSet;

use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use super::SiteContext;

/// What one listing page yielded
#[derive(Debug, Default)]
pub(crate) struct ListingPage {
    /// Absolute product URLs in page order
    pub products: Vec<String>,
    /// Next-page candidates, best first; the first unvisited one is taken
    pub next: Vec<String>,
}

/// Follow a listing from `start_url` until there is no unvisited next page
/// or `max_pages` pages were fetched. Product URLs are deduplicated by exact
/// match, first occurrence kept.
pub(crate) fn walk_listing<F>(
    ctx: &SiteContext<'_>,
    start_url: &str,
    max_pages: Option<usize>,
    mut harvest: F,
) -> Vec<String>
where
    F: FnMut(&Html, &Url) -> ListingPage,
{
    let mut collected: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut page_url = Some(start_url.to_string());

    while let Some(url) = page_url.take() {
        if visited.contains(&url) || max_pages.is_some_and(|max| visited.len() >= max) {
            break;
        }
        visited.insert(url.clone());

        let base = match Url::parse(&url) {
            Ok(base) => base,
            Err(e) => {
                warn!(url = %url, error = %e, "listing URL is not valid");
                break;
            }
        };
        let Some(html) = ctx.source.fetch(&url) else {
            break;
        };

        let page = {
            let document = Html::parse_document(&html);
            harvest(&document, &base)
        };
        debug!(url = %url, found = page.products.len(), "listing page parsed");

        for product in page.products {
            if !collected.contains(&product) {
                collected.push(product);
            }
        }

        page_url = page.next.into_iter().find(|next| !visited.contains(next));
        ctx.throttle.pause();
    }

    collected
}
