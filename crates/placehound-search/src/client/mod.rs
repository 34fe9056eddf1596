//! HTTP client for the Places API text-search and place-detail endpoints.

mod paginate;

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::{DetailFetchError, SearchError};
use crate::settings::SearchSettings;
use crate::types::{
    ApiPlace, TextSearchRequest, TextSearchResponse, DETAIL_FIELD_MASK, SEARCH_FIELD_MASK,
};
use placehound_core::PlaceDetail;

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Client for the provider's search and detail endpoints.
///
/// Search and detail requests use separate `reqwest::Client`s so each call
/// class gets its own timeout. Use [`PlacesClient::new`] with settings whose
/// `base_url` points at a mock server in tests.
pub struct PlacesClient {
    search_http: Client,
    detail_http: Client,
    api_key: String,
    base_url: Url,
    pub(super) page_size: u32,
    pub(super) max_pages: usize,
    pub(super) page_token_delay: Duration,
    pub(crate) inter_batch_delay: Duration,
}

impl PlacesClient {
    /// Builds the client from pipeline settings.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if an underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if
    /// `settings.base_url` is not an absolute hierarchical URL.
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let search_http = Client::builder()
            .timeout(settings.search_timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        let detail_http = Client::builder()
            .timeout(settings.detail_timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        // Exactly one trailing slash, so the last path segment is kept when
        // endpoint segments are appended.
        let normalised = format!("{}/", settings.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: settings.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidBaseUrl {
                base_url: settings.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            search_http,
            detail_http,
            api_key: settings.api_key.clone(),
            base_url,
            page_size: settings.page_size,
            max_pages: settings.max_pages,
            page_token_delay: settings.page_token_delay,
            inter_batch_delay: settings.inter_batch_delay,
        })
    }

    /// Fetches one text-search page.
    ///
    /// Returns the raw response so the caller can read the continuation token.
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnexpectedStatus`] on any non-2xx status, carrying the body.
    /// - [`SearchError::Http`] on network failure or timeout.
    /// - [`SearchError::Deserialize`] if the body does not match the expected shape.
    pub async fn search_page(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, SearchError> {
        let url = self.endpoint(&["places:searchText"]);
        let body = TextSearchRequest {
            text_query: query,
            page_size: self.page_size,
            page_token,
        };

        let response = self
            .search_http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<TextSearchResponse>(&text).map_err(|e| SearchError::Deserialize {
            context: format!("search page for \"{query}\""),
            source: e,
        })
    }

    /// Fetches the detail record for one place id.
    ///
    /// # Errors
    ///
    /// - [`DetailFetchError::UnexpectedStatus`] on any non-2xx status.
    /// - [`DetailFetchError::Http`] on network failure or timeout.
    /// - [`DetailFetchError::Deserialize`] if the body is not a place record.
    pub async fn fetch_detail(&self, place_id: &str) -> Result<PlaceDetail, DetailFetchError> {
        let url = self.endpoint(&["places", place_id]);
        let http_err = |source| DetailFetchError::Http {
            place_id: place_id.to_owned(),
            source,
        };

        let response = self
            .detail_http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, DETAIL_FIELD_MASK)
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        let text = response.text().await.map_err(http_err)?;
        if !status.is_success() {
            return Err(DetailFetchError::UnexpectedStatus {
                place_id: place_id.to_owned(),
                status: status.as_u16(),
                body: text,
            });
        }

        let place = serde_json::from_str::<ApiPlace>(&text).map_err(|e| {
            DetailFetchError::Deserialize {
                place_id: place_id.to_owned(),
                source: e,
            }
        })?;

        Ok(place.into_detail())
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL is hierarchical.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
