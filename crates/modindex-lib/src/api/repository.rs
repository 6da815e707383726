//! HTTP gateway for a repository laid out as `index.json` plus `<modloader>/<modname>.json`

use super::{FetchError, FetchGateway};
use crate::models::{manifest_path, IndexDocument, ManifestDocument};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/reviversmc/the-mod-index/v3/mods/";

const USER_AGENT: &str = concat!("modindex-validator/", env!("CARGO_PKG_VERSION"));

/// Network settings for [`RepositoryGateway`]
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Per-request timeout
    pub timeout: Duration,

    /// Attempts after the first one for transient failures
    pub max_retries: u32,

    /// Backoff before the first retry, doubled on each further one
    pub retry_delay: Duration,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

pub struct RepositoryGateway {
    client: Client,
    base_url: Url,
    location: String,
    options: GatewayOptions,
}

impl RepositoryGateway {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_options(base_url, GatewayOptions::default())
    }

    pub fn with_options(base_url: &str, options: GatewayOptions) -> Result<Self, FetchError> {
        let location = format_base_url(base_url);
        let base_url = Url::parse(&location).map_err(|source| FetchError::InvalidUrl {
            url: location.clone(),
            source,
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url,
            location,
            options,
        })
    }

    fn document_url(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url.join(path).map_err(|source| FetchError::InvalidUrl {
            url: format!("{}{}", self.location, path),
            source,
        })
    }

    /// GET and parse a JSON document, retrying transient failures with exponential backoff
    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_json_once(&url).await {
                Ok(document) => return Ok(document),
                Err(e) if e.is_transient() && attempt < self.options.max_retries => {
                    attempt += 1;
                    let backoff = backoff_delay(self.options.retry_delay, attempt);
                    log::warn!(
                        "Fetch of {} failed (attempt {}/{}): {}. Retrying in {}ms...",
                        url,
                        attempt,
                        self.options.max_retries.saturating_add(1),
                        e,
                        backoff.as_millis()
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_json_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|source| FetchError::Deserialize {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl FetchGateway for RepositoryGateway {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch_index(&self) -> Result<IndexDocument, FetchError> {
        let url = self.document_url("index.json")?;
        self.fetch_json(url).await
    }

    async fn fetch_manifest(
        &self,
        generic_identifier: &str,
    ) -> Result<ManifestDocument, FetchError> {
        let url = self.document_url(&manifest_path(generic_identifier))?;
        self.fetch_json(url).await
    }
}

/// Delay before retry number `attempt` (1-based): `base`, `2 * base`, `4 * base`, ...
/// saturating instead of overflowing for large attempt counts
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

/// Normalise a base url so that it ends in exactly one `/`
pub fn format_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim().trim_end_matches('/'))
}
