//! Crawl settings
//!
//! Every knob has a default matching the behaviour of the built-in site
//! strategies; a JSON file may override any subset of them.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::claims::{default_claims, ClaimDefinition};
use crate::error::{Result, ScrapeError};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Lower bound of the politeness pause, in seconds
    pub delay_min_secs: f64,
    /// Upper bound of the politeness pause, in seconds
    pub delay_max_secs: f64,
    /// Listing pages the generic strategy visits per brand
    pub generic_max_pages: usize,
    /// Product URLs the generic strategy keeps per brand
    pub generic_max_links: usize,
    /// Product URLs not longer than this are dropped by the generic strategy
    pub generic_min_url_len: usize,
    pub claims: Vec<ClaimDefinition>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            delay_min_secs: 1.0,
            delay_max_secs: 3.0,
            generic_max_pages: 10,
            generic_max_links: 100,
            generic_min_url_len: 30,
            claims: default_claims(),
        }
    }
}

impl CrawlConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot be turned into durations.
    pub fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("delay_min_secs", self.delay_min_secs),
            ("delay_max_secs", self.delay_max_secs),
        ] {
            if secs_to_duration(secs).is_none() {
                return Err(ScrapeError::Config(format!("{name} out of range: {secs}")));
            }
        }
        Ok(())
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ScrapeError::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay bounds, ordered and clamped to be non-negative. Bounds that
    /// are not representable fall back to the default range.
    pub fn delay_range(&self) -> (Duration, Duration) {
        let bounds =
            secs_to_duration(self.delay_min_secs).zip(secs_to_duration(self.delay_max_secs));
        let (lo, hi) = bounds.unwrap_or_else(|| {
            let defaults = Self::default();
            (
                Duration::from_secs_f64(defaults.delay_min_secs),
                Duration::from_secs_f64(defaults.delay_max_secs),
            )
        });
        if lo <= hi {
            (lo, hi)
        } else {
            (hi, lo)
        }
    }
}

/// Negative values clamp to zero; NaN, infinite and overflowing values are `None`.
fn secs_to_duration(secs: f64) -> Option<Duration> {
    if secs.is_nan() {
        return None;
    }
    Duration::try_from_secs_f64(secs.max(0.0)).ok()
}
