//! Fetch configuration.

use std::time::Duration;

use hilo_types::{GUESS_MAX, GUESS_MIN};
use url::Url;

/// Production endpoint serving `{"value": <n>}`.
pub const DEFAULT_ENDPOINT: &str = "https://us-central1-ss-devops.cloudfunctions.net/rand";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Resolved configuration for the target-number fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base endpoint; `min`/`max` are appended as query parameters.
    pub endpoint: Url,
    /// Lower bound requested from the server.
    pub min: u16,
    /// Upper bound requested from the server.
    pub max: u16,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout, covering the body read.
    pub read_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint must parse"),
            min: GUESS_MIN,
            max: GUESS_MAX,
            connect_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchConfig {
    /// Default configuration pointed at a different endpoint (tests, mirrors).
    #[must_use]
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    /// The full request URL, bounds included.
    #[must_use]
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("min", &self.min.to_string())
            .append_pair("max", &self.max.to_string());
        url
    }

    /// Pseudo-code rendered on the display when the fetch times out.
    #[must_use]
    pub fn timeout_code(&self) -> u32 {
        self.read_timeout.as_millis() as u32
    }
}
