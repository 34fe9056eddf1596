mod app_config;
mod config;
pub mod places;

use thiserror::Error;

pub use app_config::{
    AppConfig, Environment, DEFAULT_BIND_ADDR, DEFAULT_DETAIL_BATCH_SIZE,
    DEFAULT_DETAIL_TIMEOUT_SECS, DEFAULT_EMAIL_MAX_CONCURRENT, DEFAULT_EMAIL_TIMEOUT_SECS,
    DEFAULT_INTER_BATCH_DELAY_MS, DEFAULT_LOG_LEVEL, DEFAULT_PAGE_TOKEN_DELAY_MS,
    DEFAULT_PLACES_BASE_URL, DEFAULT_SEARCH_MAX_PAGES, DEFAULT_SEARCH_PAGE_SIZE,
    DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use places::{
    build_text_query, EnrichedPlace, GeoPoint, PlaceDetail, PlaceSummary, SearchQuery,
    DEFAULT_KEYWORD, DEFAULT_LOCATION,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
