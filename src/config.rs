//! Search configuration and fetch limits
//!
//! Everything a fetch needs up front: the endpoint, the initial query
//! parameters and the operational ceilings. There is no process-wide
//! mutable configuration; callers build these values and pass them in.

use crate::error::{Error, Result};
use crate::fetch::RequestSpec;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Graph API version the archive endpoint is pinned to
pub const GRAPH_API_VERSION: &str = "v24.0";

/// Full URL of the ads archive search endpoint
pub static ARCHIVE_ENDPOINT: Lazy<String> =
    Lazy::new(|| format!("https://graph.facebook.com/{GRAPH_API_VERSION}/ads_archive"));

/// Default target country (ISO 3166-1 alpha-2)
pub const DEFAULT_COUNTRY: &str = "DZ";

/// Default number of records requested per page
pub const DEFAULT_LIMIT: u32 = 10;

/// Record fields requested from the archive endpoint
pub const ARCHIVE_FIELDS: &[&str] = &[
    "id",
    "ad_creation_time",
    "ad_creative_bodies",
    "ad_creative_link_titles",
    "ad_creative_link_descriptions",
    "page_name",
    "ad_snapshot_url",
    "ad_reached_countries",
];

// ============================================================================
// Search Config
// ============================================================================

/// Parameters for one archive search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Country filter (ISO 3166-1 alpha-2)
    pub country: String,
    /// Free-text search term
    pub keyword: String,
    /// Records requested per page (1-100)
    pub limit: u32,
    /// Opaque credential, supplied once and never logged
    pub access_token: String,
}

impl SearchConfig {
    /// Create a search config with default country and page limit
    pub fn new(keyword: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            keyword: keyword.into(),
            limit: DEFAULT_LIMIT,
            access_token: access_token.into(),
        }
    }

    /// Set the country filter
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Set the per-page record limit
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Validate the config before a fetch
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::missing_field("access_token"));
        }
        if self.keyword.trim().is_empty() {
            return Err(Error::missing_field("keyword"));
        }
        if self.country.trim().is_empty() {
            return Err(Error::missing_field("country"));
        }
        if !(1..=100).contains(&self.limit) {
            return Err(Error::invalid_value(
                "limit",
                format!("must be between 1 and 100, got {}", self.limit),
            ));
        }
        Ok(())
    }

    /// Build the query parameters for the first page
    pub fn initial_spec(&self) -> RequestSpec {
        RequestSpec::new()
            .with("access_token", &self.access_token)
            .with("ad_reached_countries", &self.country)
            .with("ad_active_status", "ALL")
            .with("ad_type", "ALL")
            .with("search_terms", &self.keyword)
            .with("fields", ARCHIVE_FIELDS.join(","))
            .with("limit", self.limit.to_string())
    }
}

// ============================================================================
// Fetch Limits
// ============================================================================

/// Operational ceilings for a fetch
#[derive(Debug, Clone)]
pub struct FetchLimits {
    /// Maximum pages to fetch before stopping
    pub max_pages: u32,
    /// Attempts per page before giving up on timeouts
    pub max_retries_per_page: u32,
    /// Timeout applied to each request
    pub request_timeout: Duration,
    /// Cooperative pause between consecutive pages
    pub inter_page_delay: Duration,
    /// Fixed pause before a timeout retry
    pub retry_backoff: Duration,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_pages: 10,
            max_retries_per_page: 3,
            request_timeout: Duration::from_secs(10),
            inter_page_delay: Duration::from_secs(1),
            retry_backoff: Duration::from_secs(2),
        }
    }
}

impl FetchLimits {
    /// Create limits with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page cap
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the attempts per page
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries_per_page = retries;
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the pause between pages
    #[must_use]
    pub fn with_inter_page_delay(mut self, delay: Duration) -> Self {
        self.inter_page_delay = delay;
        self
    }

    /// Set the pause before a timeout retry
    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}
