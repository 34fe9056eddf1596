//! Places API (v1) request/response shapes.
//!
//! ## Observed shape
//!
//! ### `places`
//! Omitted entirely (not `[]`) when a text search matches nothing, so it is
//! `#[serde(default)]`.
//!
//! ### `nextPageToken`
//! Only present when another page exists. It must be listed in the
//! `X-Goog-FieldMask` header or the API silently drops it. Treated as absent
//! when empty.
//!
//! ### `displayName`
//! A localized-text object `{ "text": "...", "languageCode": "en" }`; only
//! `text` is kept.
//!
//! ### `location`
//! `{ "latitude": f64, "longitude": f64 }`. Kept only when both halves are
//! present.

use serde::{Deserialize, Serialize};

use placehound_core::{GeoPoint, PlaceDetail, PlaceSummary};

/// Field mask for text-search pages. `nextPageToken` is required for paging.
pub const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.rating,nextPageToken";

/// Field mask for the per-place detail request.
pub const DETAIL_FIELD_MASK: &str =
    "id,displayName,formattedAddress,internationalPhoneNumber,websiteUri,rating,location";

/// Body of `POST /places:searchText`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchRequest<'a> {
    pub text_query: &'a str,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

/// Response of `POST /places:searchText`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSearchResponse {
    #[serde(default)]
    pub places: Vec<ApiPlace>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl TextSearchResponse {
    /// The continuation token, if another page exists.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// A place as returned by either endpoint. Which fields are populated
/// depends on the field mask sent with the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlace {
    #[serde(default)]
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub international_phone_number: Option<String>,
    pub website_uri: Option<String>,
    pub rating: Option<f64>,
    pub location: Option<LatLng>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocalizedText {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatLng {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LatLng {
    fn to_point(&self) -> Option<GeoPoint> {
        Some(GeoPoint {
            lat: self.latitude?,
            lng: self.longitude?,
        })
    }
}

impl ApiPlace {
    fn name(&self) -> Option<String> {
        self.display_name.as_ref().and_then(|d| d.text.clone())
    }

    #[must_use]
    pub fn into_summary(self) -> PlaceSummary {
        PlaceSummary {
            name: self.name(),
            location: self.location.as_ref().and_then(LatLng::to_point),
            id: self.id,
            address: self.formatted_address,
            rating: self.rating,
        }
    }

    #[must_use]
    pub fn into_detail(self) -> PlaceDetail {
        PlaceDetail {
            name: self.name(),
            location: self.location.as_ref().and_then(LatLng::to_point),
            id: self.id,
            address: self.formatted_address,
            phone: self.international_phone_number,
            website: self.website_uri.filter(|w| !w.trim().is_empty()),
            rating: self.rating,
        }
    }
}
