//! Pipeline tuning, injected into [`crate::PlaceAggregator`] at construction.

use std::time::Duration;

use placehound_core::{
    AppConfig, DEFAULT_DETAIL_BATCH_SIZE, DEFAULT_DETAIL_TIMEOUT_SECS,
    DEFAULT_EMAIL_MAX_CONCURRENT, DEFAULT_EMAIL_TIMEOUT_SECS, DEFAULT_INTER_BATCH_DELAY_MS,
    DEFAULT_PAGE_TOKEN_DELAY_MS, DEFAULT_SEARCH_MAX_PAGES, DEFAULT_SEARCH_PAGE_SIZE,
    DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Everything the pipeline needs to talk to the provider and pace itself.
///
/// Nothing below reads the process environment; build one from
/// [`AppConfig`] in binaries or with [`SearchSettings::new`] in tests.
#[derive(Clone)]
pub struct SearchSettings {
    pub api_key: String,
    pub base_url: String,
    pub user_agent: String,
    /// `pageSize` sent with every text-search request.
    pub page_size: u32,
    /// Hard stop for cycling continuation tokens.
    pub max_pages: usize,
    /// Wait before following a `nextPageToken`. Tokens are rejected as
    /// invalid if replayed sooner than roughly two seconds after issue.
    pub page_token_delay: Duration,
    /// Detail fetches in flight at once.
    pub batch_size: usize,
    /// Quiet period between detail groups, to stay under the provider quota.
    pub inter_batch_delay: Duration,
    pub search_timeout: Duration,
    pub detail_timeout: Duration,
    pub email_timeout: Duration,
    /// Concurrent website fetches during enrichment. `1` is strictly sequential.
    pub email_max_concurrent: usize,
}

impl SearchSettings {
    /// Settings with production defaults for the given credentials and endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_size: DEFAULT_SEARCH_PAGE_SIZE,
            max_pages: DEFAULT_SEARCH_MAX_PAGES,
            page_token_delay: Duration::from_millis(DEFAULT_PAGE_TOKEN_DELAY_MS),
            batch_size: DEFAULT_DETAIL_BATCH_SIZE,
            inter_batch_delay: Duration::from_millis(DEFAULT_INTER_BATCH_DELAY_MS),
            search_timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            detail_timeout: Duration::from_secs(DEFAULT_DETAIL_TIMEOUT_SECS),
            email_timeout: Duration::from_secs(DEFAULT_EMAIL_TIMEOUT_SECS),
            email_max_concurrent: DEFAULT_EMAIL_MAX_CONCURRENT,
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.places_api_key.clone(),
            base_url: config.places_base_url.clone(),
            user_agent: config.user_agent.clone(),
            page_size: config.search_page_size,
            max_pages: config.search_max_pages,
            page_token_delay: Duration::from_millis(config.page_token_delay_ms),
            batch_size: config.detail_batch_size,
            inter_batch_delay: Duration::from_millis(config.inter_batch_delay_ms),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            detail_timeout: Duration::from_secs(config.detail_timeout_secs),
            email_timeout: Duration::from_secs(config.email_timeout_secs),
            email_max_concurrent: config.email_max_concurrent,
        }
    }
}

impl std::fmt::Debug for SearchSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSettings")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("page_token_delay", &self.page_token_delay)
            .field("batch_size", &self.batch_size)
            .field("inter_batch_delay", &self.inter_batch_delay)
            .field("search_timeout", &self.search_timeout)
            .field("detail_timeout", &self.detail_timeout)
            .field("email_timeout", &self.email_timeout)
            .field("email_max_concurrent", &self.email_max_concurrent)
            .finish()
    }
}
