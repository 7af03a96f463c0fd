//! Photo redirect: resolve a Google photo URI server-side (so the API key
//! never reaches the client) and 302 to it, with a process-wide TTL cache
//! in front of the lookup.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use midlo_places::PlacesError;

use crate::api::{map_upstream_error, ApiError, AppState, GoogleBackend};
use crate::middleware::RequestId;
use crate::mock;

const DEFAULT_WIDTH_PX: u32 = 1200;
const DEFAULT_MOCK_HEIGHT_PX: u32 = 800;
const MAX_DIMENSION_PX: u32 = 2_000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoParams {
    pub name: String,
    #[serde(default)]
    pub max_width_px: Option<u32>,
    #[serde(default)]
    pub max_height_px: Option<u32>,
}

pub async fn place_photo(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PhotoParams>,
) -> Result<Response, ApiError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(ApiError::new(&req_id.0, "bad_request", "Missing photo name"));
    }
    // Google photo names look like places/{place_id}/photos/{photo_id};
    // anything else is misuse of the proxy.
    if !name.starts_with("places/") || name.contains("..") {
        return Err(ApiError::new(&req_id.0, "bad_request", "Invalid photo name"));
    }

    let width = params
        .max_width_px
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH_PX)
        .min(MAX_DIMENSION_PX);
    let height = params
        .max_height_px
        .filter(|h| *h > 0)
        .map(|h| h.min(MAX_DIMENSION_PX));

    let uri = match state.google_backend(&req_id.0)? {
        GoogleBackend::Mock => mock::mock_photo_uri(width, height.unwrap_or(DEFAULT_MOCK_HEIGHT_PX)),
        GoogleBackend::Live(client) => {
            let key = (name.to_owned(), width, height);
            if let Some(cached) = state.photo_cache.get(&key).await {
                cached
            } else {
                let resolved = client
                    .photo_uri(name, width, height)
                    .await
                    .map_err(|e| map_photo_error(req_id.0.clone(), &e))?;
                state.photo_cache.insert(key, resolved.clone()).await;
                resolved
            }
        }
    };

    redirect_response(&req_id.0, &uri)
}

fn map_photo_error(request_id: String, error: &PlacesError) -> ApiError {
    if matches!(error, PlacesError::MissingPhotoUri) {
        return ApiError::new(
            request_id,
            "upstream_error",
            "Photo lookup did not return a photoUri",
        );
    }
    map_upstream_error(request_id, "Photo lookup", error)
}

/// A 302 with a day of client-side caching; the Google URI itself is
/// short-lived but stable well past that window.
fn redirect_response(request_id: &str, uri: &str) -> Result<Response, ApiError> {
    let location = HeaderValue::from_str(uri).map_err(|_| {
        ApiError::new(
            request_id,
            "upstream_error",
            "Photo lookup returned an invalid URI",
        )
    })?;

    let mut response = StatusCode::FOUND.into_response();
    response.headers_mut().insert(header::LOCATION, location);
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );
    Ok(response)
}
