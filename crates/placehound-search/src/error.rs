use thiserror::Error;

/// Fatal failure of the text-search stage. Aborts the whole aggregation.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("places search returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination limit reached for \"{query}\": exceeded {max_pages} pages")]
    PaginationLimit { query: String, max_pages: usize },

    #[error("invalid places base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Failure fetching a single place's detail record.
///
/// Recoverable: the batch scheduler logs it and leaves a gap at that position.
#[derive(Debug, Error)]
pub enum DetailFetchError {
    #[error("HTTP error fetching place {place_id}: {source}")]
    Http {
        place_id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("place detail {place_id} returned HTTP {status}: {body}")]
    UnexpectedStatus {
        place_id: String,
        status: u16,
        body: String,
    },

    #[error("JSON deserialization error for place {place_id}: {source}")]
    Deserialize {
        place_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Website fetch failure during email extraction. Never leaves the crate.
#[derive(Debug, Error)]
pub(crate) enum EmailFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
