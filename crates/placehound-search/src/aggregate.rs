//! The search entry point: paginate, resolve details, dedup, enrich.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::client::PlacesClient;
use crate::email::EmailExtractor;
use crate::error::SearchError;
use crate::settings::SearchSettings;
use placehound_core::{build_text_query, EnrichedPlace, PlaceDetail};

/// Per-call counters, logged once per search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub summaries: usize,
    pub detail_failures: usize,
    pub duplicates: usize,
    pub emails_found: usize,
    pub results: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchReport {
    pub results: Vec<EnrichedPlace>,
    pub stats: SearchStats,
}

/// Orchestrates one search call end to end.
///
/// Holds no per-call state, so one instance can serve concurrent searches.
pub struct PlaceAggregator {
    places: PlacesClient,
    emails: EmailExtractor,
    batch_size: usize,
    email_max_concurrent: usize,
}

impl PlaceAggregator {
    /// # Errors
    ///
    /// Returns [`SearchError`] if an HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn new(settings: &SearchSettings) -> Result<Self, SearchError> {
        let places = PlacesClient::new(settings)?;
        let emails = EmailExtractor::new(settings.email_timeout, &settings.user_agent)?;
        Ok(Self::from_parts(
            places,
            emails,
            settings.batch_size,
            settings.email_max_concurrent,
        ))
    }

    #[must_use]
    pub fn from_parts(
        places: PlacesClient,
        emails: EmailExtractor,
        batch_size: usize,
        email_max_concurrent: usize,
    ) -> Self {
        Self {
            places,
            emails,
            batch_size: batch_size.max(1),
            email_max_concurrent: email_max_concurrent.max(1),
        }
    }

    /// Searches for `keyword` near `location` and returns the enriched,
    /// deduplicated places in first-seen order.
    ///
    /// # Errors
    ///
    /// Only a failed search page is fatal; see [`PlacesClient::fetch_all_summaries`].
    pub async fn search(
        &self,
        location: &str,
        keyword: &str,
    ) -> Result<Vec<EnrichedPlace>, SearchError> {
        Ok(self.search_report(location, keyword).await?.results)
    }

    /// Like [`Self::search`], also returning per-stage counters.
    ///
    /// # Errors
    ///
    /// Only a failed search page is fatal; see [`PlacesClient::fetch_all_summaries`].
    pub async fn search_report(
        &self,
        location: &str,
        keyword: &str,
    ) -> Result<SearchReport, SearchError> {
        let query = build_text_query(location, keyword);
        let summaries = self.places.fetch_all_summaries(&query).await?;

        if summaries.is_empty() {
            tracing::info!(query = %query, "search returned no places");
            return Ok(SearchReport::default());
        }

        let details = self
            .places
            .fetch_details_in_batches(&summaries, self.batch_size)
            .await;
        let unique = dedup_details(details);

        // Dedup runs before enrichment so a repeated place costs no extra fetch.
        let lookups: Vec<_> = unique
            .kept
            .iter()
            .map(|detail| self.emails.extract_email(detail.website.as_deref()))
            .collect();
        let emails: Vec<String> = stream::iter(lookups)
            .buffered(self.email_max_concurrent)
            .collect()
            .await;

        let results: Vec<EnrichedPlace> = unique
            .kept
            .into_iter()
            .zip(emails)
            .map(|(detail, email)| EnrichedPlace::from_detail(detail, email))
            .collect();

        let stats = SearchStats {
            summaries: summaries.len(),
            detail_failures: unique.failures,
            duplicates: unique.duplicates,
            emails_found: results.iter().filter(|p| !p.email.is_empty()).count(),
            results: results.len(),
        };

        if stats.detail_failures > 0 {
            tracing::warn!(
                query = %query,
                detail_failures = stats.detail_failures,
                summaries = stats.summaries,
                "some places were dropped after failed detail fetches"
            );
        }
        tracing::info!(
            query = %query,
            summaries = stats.summaries,
            detail_failures = stats.detail_failures,
            duplicates = stats.duplicates,
            emails_found = stats.emails_found,
            results = stats.results,
            "search complete"
        );

        Ok(SearchReport { results, stats })
    }
}

struct Deduped {
    kept: Vec<PlaceDetail>,
    failures: usize,
    duplicates: usize,
}

/// Drops failed positions and repeated identity keys, keeping first-seen order.
fn dedup_details(details: Vec<Option<PlaceDetail>>) -> Deduped {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(details.len());
    let mut failures = 0usize;
    let mut duplicates = 0usize;

    for detail in details {
        let Some(detail) = detail else {
            failures += 1;
            continue;
        };
        if seen.insert(detail.dedup_key()) {
            kept.push(detail);
        } else {
            duplicates += 1;
        }
    }

    Deduped {
        kept,
        failures,
        duplicates,
    }
}
