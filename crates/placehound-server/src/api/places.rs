use axum::{
    extract::{Query, State},
    Extension, Json,
};
use placehound_core::{EnrichedPlace, SearchQuery};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PlacesParams {
    pub location: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PlacesResponse {
    pub results: Vec<EnrichedPlace>,
}

/// `GET /api/places?location=..&keyword=..`
///
/// Blank or missing parameters fall back to the defaults in
/// [`SearchQuery::with_defaults`].
pub(super) async fn search_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<PlacesResponse>, ApiError> {
    let query = SearchQuery::with_defaults(params.location.as_deref(), params.keyword.as_deref());

    match state
        .aggregator
        .search_report(&query.location, &query.keyword)
        .await
    {
        Ok(report) => {
            tracing::info!(
                request_id = %req_id.0,
                location = %query.location,
                keyword = %query.keyword,
                results = report.stats.results,
                "places search served"
            );
            Ok(Json(PlacesResponse {
                results: report.results,
            }))
        }
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                location = %query.location,
                keyword = %query.keyword,
                error = %e,
                "places search failed"
            );
            Err(ApiError::new(e.to_string()))
        }
    }
}
