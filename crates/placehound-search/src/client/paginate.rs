//! Multi-page text-search loop for `PlacesClient`.

use crate::error::SearchError;
use placehound_core::PlaceSummary;

use super::PlacesClient;

impl PlacesClient {
    /// Fetches every summary for `query` by following `nextPageToken` until
    /// the provider stops issuing one.
    ///
    /// Before each continued request the client waits `page_token_delay`;
    /// a token replayed too soon after issue is rejected by the provider.
    ///
    /// **All-or-nothing semantics**: on any page failure the summaries from
    /// earlier pages are discarded and the error is returned.
    ///
    /// Summaries without an id cannot be resolved to details and are dropped.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::search_page`].
    /// Returns [`SearchError::PaginationLimit`] if more than `max_pages`
    /// pages would be requested.
    pub async fn fetch_all_summaries(&self, query: &str) -> Result<Vec<PlaceSummary>, SearchError> {
        let mut summaries: Vec<PlaceSummary> = Vec::new();
        let mut token: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.max_pages {
                return Err(SearchError::PaginationLimit {
                    query: query.to_owned(),
                    max_pages: self.max_pages,
                });
            }

            if token.is_some() && !self.page_token_delay.is_zero() {
                tokio::time::sleep(self.page_token_delay).await;
            }

            let page = self.search_page(query, token.as_deref()).await?;
            token = page.continuation().map(str::to_owned);

            let page_len = page.places.len();
            for place in page.places {
                if place.id.is_empty() {
                    tracing::warn!(query, page = page_count, "search result without place id; skipping");
                    continue;
                }
                summaries.push(place.into_summary());
            }

            tracing::debug!(
                query,
                page = page_count,
                page_len,
                has_next = token.is_some(),
                "fetched search page"
            );

            if token.is_none() {
                break;
            }
        }

        Ok(summaries)
    }
}
