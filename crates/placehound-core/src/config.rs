use std::str::FromStr;

use crate::app_config::{
    AppConfig, Environment, DEFAULT_BIND_ADDR, DEFAULT_DETAIL_BATCH_SIZE,
    DEFAULT_DETAIL_TIMEOUT_SECS, DEFAULT_EMAIL_MAX_CONCURRENT, DEFAULT_EMAIL_TIMEOUT_SECS,
    DEFAULT_INTER_BATCH_DELAY_MS, DEFAULT_LOG_LEVEL, DEFAULT_PAGE_TOKEN_DELAY_MS,
    DEFAULT_PLACES_BASE_URL, DEFAULT_SEARCH_MAX_PAGES, DEFAULT_SEARCH_PAGE_SIZE,
    DEFAULT_SEARCH_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("PLACEHOUND_ENV", "development"))?;
    let bind_addr = parse_addr("PLACEHOUND_BIND_ADDR", DEFAULT_BIND_ADDR)?;
    let log_level = or_default("PLACEHOUND_LOG_LEVEL", DEFAULT_LOG_LEVEL);
    let places_base_url = or_default("PLACEHOUND_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let user_agent = or_default("PLACEHOUND_USER_AGENT", DEFAULT_USER_AGENT);

    let search_page_size = non_zero(
        "PLACEHOUND_SEARCH_PAGE_SIZE",
        parse_or(&lookup, "PLACEHOUND_SEARCH_PAGE_SIZE", DEFAULT_SEARCH_PAGE_SIZE)?,
    )?;
    let search_max_pages = non_zero(
        "PLACEHOUND_SEARCH_MAX_PAGES",
        parse_or(&lookup, "PLACEHOUND_SEARCH_MAX_PAGES", DEFAULT_SEARCH_MAX_PAGES)?,
    )?;
    let page_token_delay_ms = parse_or(
        &lookup,
        "PLACEHOUND_PAGE_TOKEN_DELAY_MS",
        DEFAULT_PAGE_TOKEN_DELAY_MS,
    )?;
    let detail_batch_size = non_zero(
        "PLACEHOUND_DETAIL_BATCH_SIZE",
        parse_or(&lookup, "PLACEHOUND_DETAIL_BATCH_SIZE", DEFAULT_DETAIL_BATCH_SIZE)?,
    )?;
    let inter_batch_delay_ms = parse_or(
        &lookup,
        "PLACEHOUND_INTER_BATCH_DELAY_MS",
        DEFAULT_INTER_BATCH_DELAY_MS,
    )?;

    // A zero timeout fails every request of that class.
    let search_timeout_secs = non_zero(
        "PLACEHOUND_SEARCH_TIMEOUT_SECS",
        parse_or(&lookup, "PLACEHOUND_SEARCH_TIMEOUT_SECS", DEFAULT_SEARCH_TIMEOUT_SECS)?,
    )?;
    let detail_timeout_secs = non_zero(
        "PLACEHOUND_DETAIL_TIMEOUT_SECS",
        parse_or(&lookup, "PLACEHOUND_DETAIL_TIMEOUT_SECS", DEFAULT_DETAIL_TIMEOUT_SECS)?,
    )?;
    let email_timeout_secs = non_zero(
        "PLACEHOUND_EMAIL_TIMEOUT_SECS",
        parse_or(&lookup, "PLACEHOUND_EMAIL_TIMEOUT_SECS", DEFAULT_EMAIL_TIMEOUT_SECS)?,
    )?;
    let email_max_concurrent = non_zero(
        "PLACEHOUND_EMAIL_MAX_CONCURRENT",
        parse_or(&lookup, "PLACEHOUND_EMAIL_MAX_CONCURRENT", DEFAULT_EMAIL_MAX_CONCURRENT)?,
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        places_api_key,
        places_base_url,
        user_agent,
        search_page_size,
        search_max_pages,
        page_token_delay_ms,
        detail_batch_size,
        inter_batch_delay_ms,
        search_timeout_secs,
        detail_timeout_secs,
        email_timeout_secs,
        email_max_concurrent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACEHOUND_ENV".to_string(),
            reason: format!("expected development, test or production, got \"{other}\""),
        }),
    }
}

/// Parse `var` if set, otherwise return `default`.
fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Ok(raw) => raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn non_zero<T>(var: &str, value: T) -> Result<T, ConfigError>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
