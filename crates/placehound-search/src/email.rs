//! Best-effort contact email scraping from a place's website.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;

use crate::error::{EmailFetchError, SearchError};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

/// Returns the first email-looking substring of `body`, in text order.
///
/// No ranking and no validation beyond the pattern: a page listing several
/// addresses yields whichever appears first.
#[must_use]
pub fn find_first_email(body: &str) -> Option<&str> {
    EMAIL_RE.find(body).map(|m| m.as_str())
}

/// Bytes of a website body scanned for an address; the rest is never read.
pub const MAX_PAGE_BYTES: usize = 1024 * 1024;

/// Fetches website pages and pulls a contact email out of them.
pub struct EmailExtractor {
    client: Client,
    max_page_bytes: usize,
}

impl EmailExtractor {
    /// Builds an extractor whose page fetches give up after `timeout`.
    /// Redirects are followed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_page_bytes: MAX_PAGE_BYTES,
        })
    }

    /// Overrides how much of each page is read before scanning.
    #[must_use]
    pub fn with_max_page_bytes(mut self, max_page_bytes: usize) -> Self {
        self.max_page_bytes = max_page_bytes;
        self
    }

    /// Returns the first email on the page at `website`, or an empty string.
    ///
    /// Never fails. No website means no request at all; a network error,
    /// timeout or non-2xx status yields `""`. Only the first
    /// `max_page_bytes` of the body are scanned; invalid UTF-8 is replaced.
    pub async fn extract_email(&self, website: Option<&str>) -> String {
        let Some(url) = website.map(str::trim).filter(|w| !w.is_empty()) else {
            return String::new();
        };

        match self.fetch_page(url).await {
            Ok(body) => find_first_email(&body).map(str::to_owned).unwrap_or_default(),
            Err(err) => {
                tracing::debug!(url, error = %err, "website fetch failed; no email");
                String::new()
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, EmailFetchError> {
        let mut response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmailFetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let mut body = Vec::new();
        while body.len() < self.max_page_bytes {
            let Some(chunk) = response.chunk().await? else {
                break;
            };
            let room = self.max_page_bytes - body.len();
            body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
