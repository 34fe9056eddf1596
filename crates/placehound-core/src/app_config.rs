use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
pub const DEFAULT_USER_AGENT: &str = "placehound/0.1 (place-search)";
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 20;
pub const DEFAULT_SEARCH_MAX_PAGES: usize = 50;
pub const DEFAULT_PAGE_TOKEN_DELAY_MS: u64 = 2000;
pub const DEFAULT_DETAIL_BATCH_SIZE: usize = 20;
pub const DEFAULT_INTER_BATCH_DELAY_MS: u64 = 200;
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DETAIL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMAIL_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EMAIL_MAX_CONCURRENT: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, loaded once at startup and handed to the
/// aggregator by value.
///
/// The delay and batch knobs default to the values the provider tolerates:
/// `page_token_delay_ms` must exceed the time it takes a freshly issued
/// `nextPageToken` to become valid, and `inter_batch_delay_ms` keeps detail
/// bursts under the per-minute quota.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub places_api_key: String,
    pub places_base_url: String,
    pub user_agent: String,
    pub search_page_size: u32,
    pub search_max_pages: usize,
    pub page_token_delay_ms: u64,
    pub detail_batch_size: usize,
    pub inter_batch_delay_ms: u64,
    pub search_timeout_secs: u64,
    pub detail_timeout_secs: u64,
    pub email_timeout_secs: u64,
    pub email_max_concurrent: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("user_agent", &self.user_agent)
            .field("search_page_size", &self.search_page_size)
            .field("search_max_pages", &self.search_max_pages)
            .field("page_token_delay_ms", &self.page_token_delay_ms)
            .field("detail_batch_size", &self.detail_batch_size)
            .field("inter_batch_delay_ms", &self.inter_batch_delay_ms)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("detail_timeout_secs", &self.detail_timeout_secs)
            .field("email_timeout_secs", &self.email_timeout_secs)
            .field("email_max_concurrent", &self.email_max_concurrent)
            .finish()
    }
}
