pub mod http_client;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::app::{ReelError, Result};
use crate::config::{ApiConfig, ConfigError};
use crate::domain::{Movie, MovieSummary};

pub use http_client::HttpCatalogClient;

/// Environment variable holding the bearer token.
pub const ACCESS_KEY_VAR: &str = "API_ACCESS_KEY";

#[async_trait]
pub trait CatalogClient {
    /// Search by title. Blank queries fail locally with
    /// [`ReelError::InvalidArgument`] and never reach the network.
    async fn search(&self, query: &str) -> Result<SearchResults>;

    /// Listing ordered by popularity.
    async fn popular(&self) -> Result<SearchResults>;

    async fn get_by_id(&self, id: &str) -> Result<Movie>;
}

/// Single-pass results in the order the server ranked them.
///
/// Not restartable: run the query again for a fresh sequence.
#[derive(Debug)]
pub struct SearchResults {
    inner: std::vec::IntoIter<MovieSummary>,
}

impl SearchResults {
    pub fn new(results: Vec<MovieSummary>) -> Self {
        Self {
            inner: results.into_iter(),
        }
    }
}

impl Iterator for SearchResults {
    type Item = MovieSummary;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SearchResults {}

/// Trim a search query, rejecting ones that end up empty.
pub fn normalize_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ReelError::InvalidArgument(
            "search query must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Immutable client settings, built once at startup.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Option<Duration>,
    access_key: String,
}

impl ClientConfig {
    pub fn new(base_url: &str, access_key: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".into(),
            });
        }

        Ok(Self {
            base_url: parsed,
            timeout: None,
            access_key: access_key.into(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build from the `[api]` config section, taking the credential from
    /// `lookup(ACCESS_KEY_VAR)`.
    pub fn from_settings<F>(api: &ApiConfig, lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(ACCESS_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential(ACCESS_KEY_VAR))?;

        let mut config = Self::new(&api.base_url, access_key)?;
        if let Some(ms) = api.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        Ok(config)
    }

    pub fn from_env(api: &ApiConfig) -> std::result::Result<Self, ConfigError> {
        Self::from_settings(api, |key| std::env::var(key).ok())
    }

    pub(crate) fn access_key(&self) -> &str {
        &self.access_key
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("access_key", &"<redacted>")
            .finish()
    }
}
