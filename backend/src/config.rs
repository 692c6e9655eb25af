//! Card catalog configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://db.ygoprodeck.com/api/v7/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SET_CACHE_TTL_HOURS: u64 = 24;
const MAX_SET_CACHE_TTL_HOURS: u64 = 24 * 365;

/// Settings for the catalog HTTP client and the set directory cache.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DECK_CATALOG")]
pub struct CatalogSettings {
    /// Catalog API base URL.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Set directory freshness window in hours.
    pub set_cache_ttl_hours: Option<u64>,
}

impl CatalogSettings {
    /// Return the configured base URL, falling back to the public catalog.
    ///
    /// A trailing slash is added so endpoint paths join beneath the base.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an absolute URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim();
        if raw.ends_with('/') {
            Url::parse(raw)
        } else {
            Url::parse(&format!("{raw}/"))
        }
    }

    /// Return the configured request timeout, at least one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Return the set directory TTL, clamped to between an hour and a year.
    pub fn set_cache_ttl(&self) -> Duration {
        let hours = self
            .set_cache_ttl_hours
            .unwrap_or(DEFAULT_SET_CACHE_TTL_HOURS)
            .clamp(1, MAX_SET_CACHE_TTL_HOURS);
        Duration::from_secs(hours * 60 * 60)
    }
}
