//! Page fetching and the politeness delay
//!
//! Fetches are blocking and sequential. Transport errors and non-200
//! responses are logged and surface as "no content".

use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::config::CrawlConfig;
use crate::error::{Result, ScrapeError};

/// Source of page bodies
pub trait PageSource {
    /// Body of `url`, or `None` when the page could not be fetched.
    fn fetch(&self, url: &str) -> Option<String>;
}

/// Blocking HTTP client (ureq) with a fixed user agent and timeout
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(config: &CrawlConfig) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(config.timeout()))
                .user_agent(config.user_agent.as_str())
                .http_status_as_error(false)
                .build(),
        );
        Self { agent }
    }

    /// GET `url`; anything other than 200 is an error.
    pub fn get(&self, url: &str) -> Result<String> {
        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ScrapeError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        let status = resp.status().as_u16();
        if status != 200 {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status,
            });
        }

        resp.into_body()
            .read_to_string()
            .map_err(|e| ScrapeError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })
    }
}

impl PageSource for HttpClient {
    fn fetch(&self, url: &str) -> Option<String> {
        match self.get(url) {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url, error = %e, "fetch failed");
                None
            }
        }
    }
}

/// Uniformly random pause between consecutive requests
#[derive(Debug, Clone)]
pub struct Throttle {
    min: Duration,
    max: Duration,
}

impl Throttle {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        let (min, max) = config.delay_range();
        Self::new(min, max)
    }

    /// No pause at all
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let secs = rand::thread_rng().gen_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    pub fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "politeness pause");
            std::thread::sleep(delay);
        }
    }
}
