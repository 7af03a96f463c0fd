//! Place discovery around a midpoint: the thin HTTP wrapper over the
//! aggregator/filter/presenter pipeline.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use midlo_core::Coordinate;
use midlo_discovery::{discover_places, DiscoveryError};

use crate::api::{map_upstream_error, ApiError, ApiResponse, AppState, GoogleBackend, ResponseMeta};
use crate::middleware::RequestId;
use crate::mock;

#[derive(Debug, Deserialize)]
pub struct PlacesRequest {
    pub lat: f64,
    pub lng: f64,
}

pub async fn places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<PlacesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let midpoint = Coordinate::new(request.lat, request.lng);
    if !midpoint.is_in_range() {
        return Err(ApiError::new(
            &req_id.0,
            "bad_request",
            "lat must be within ±90 and lng within ±180",
        ));
    }

    let data = match state.google_backend(&req_id.0)? {
        GoogleBackend::Live(client) => {
            let config = state.discovery_config();
            let mut rng = StdRng::from_os_rng();
            discover_places(client, midpoint, &config, &mut rng)
                .await
                .map_err(|e| match e {
                    DiscoveryError::Oracle(source) => {
                        map_upstream_error(req_id.0.clone(), "Places search", &source)
                    }
                })?
        }
        GoogleBackend::Mock => mock::mock_places(midpoint),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
