//! Midpoint calculation: geocode both addresses and average the coordinates.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use midlo_core::Coordinate;

use crate::api::{
    map_geocode_error, ApiError, ApiResponse, AppState, GoogleBackend, ResponseMeta,
};
use crate::middleware::RequestId;
use crate::mock;

/// Anything shorter than this cannot be a real address.
const MIN_ADDRESS_LEN: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidpointRequest {
    pub address_a: String,
    pub address_b: String,
}

#[derive(Debug, Serialize)]
pub struct MidpointResponse {
    pub lat: f64,
    pub lng: f64,
}

pub async fn midpoint(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<MidpointRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let address_a = validate_address(&req_id.0, &request.address_a)?;
    let address_b = validate_address(&req_id.0, &request.address_b)?;

    let (coord_a, coord_b) = match state.google_backend(&req_id.0)? {
        GoogleBackend::Live(client) => {
            let a = client
                .geocode(address_a)
                .await
                .map_err(|e| map_geocode_error(req_id.0.clone(), &e))?;
            let b = client
                .geocode(address_b)
                .await
                .map_err(|e| map_geocode_error(req_id.0.clone(), &e))?;
            (a, b)
        }
        GoogleBackend::Mock => (
            mock::mock_coordinate(address_a),
            mock::mock_coordinate(address_b),
        ),
    };

    let mid = Coordinate::midpoint(coord_a, coord_b);
    Ok(Json(ApiResponse {
        data: MidpointResponse {
            lat: mid.lat,
            lng: mid.lng,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn validate_address<'a>(request_id: &str, address: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = address.trim();
    if trimmed.len() < MIN_ADDRESS_LEN {
        return Err(ApiError::new(
            request_id,
            "bad_request",
            "Please enter a real address (at least 3 characters)",
        ));
    }
    Ok(trimmed)
}
