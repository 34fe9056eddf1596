//! Request-scoped place records shared by the search pipeline and its callers.

use serde::{Deserialize, Serialize};

/// Location used when the caller leaves it blank.
pub const DEFAULT_LOCATION: &str = "New York, USA";
/// Keyword used when the caller leaves it blank.
pub const DEFAULT_KEYWORD: &str = "business";

/// Caller input for one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub location: String,
    pub keyword: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(location: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            keyword: keyword.into(),
        }
    }

    /// Builds a query from optional caller input, substituting
    /// [`DEFAULT_LOCATION`] / [`DEFAULT_KEYWORD`] for absent or blank values.
    #[must_use]
    pub fn with_defaults(location: Option<&str>, keyword: Option<&str>) -> Self {
        fn pick(value: Option<&str>, fallback: &str) -> String {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        }
        Self {
            location: pick(location, DEFAULT_LOCATION),
            keyword: pick(keyword, DEFAULT_KEYWORD),
        }
    }

    /// The free-text string sent to the provider.
    #[must_use]
    pub fn text_query(&self) -> String {
        build_text_query(&self.location, &self.keyword)
    }
}

/// `"<keyword> in <location>"`. No trimming or validation.
#[must_use]
pub fn build_text_query(location: &str, keyword: &str) -> String {
    format!("{keyword} in {location}")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Minimal record returned by a search page. `id` joins to the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub rating: Option<f64>,
}

/// Richer per-place record. Any field besides `id` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub id: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub location: Option<GeoPoint>,
}

impl PlaceDetail {
    /// Identity used to suppress duplicates: the id when non-empty, otherwise
    /// `"<name>-<address>"` with absent parts rendered empty.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        if self.id.is_empty() {
            format!(
                "{}-{}",
                self.name.as_deref().unwrap_or_default(),
                self.address.as_deref().unwrap_or_default()
            )
        } else {
            self.id.clone()
        }
    }
}

/// Final output unit. Missing text fields serialize as empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPlace {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl EnrichedPlace {
    #[must_use]
    pub fn from_detail(detail: PlaceDetail, email: String) -> Self {
        Self {
            id: detail.id,
            name: detail.name.unwrap_or_default(),
            address: detail.address.unwrap_or_default(),
            phone: detail.phone.unwrap_or_default(),
            website: detail.website.unwrap_or_default(),
            email,
            rating: detail.rating,
            lat: detail.location.map(|p| p.lat),
            lng: detail.location.map(|p| p.lng),
        }
    }
}
