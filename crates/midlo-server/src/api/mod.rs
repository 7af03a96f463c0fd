pub mod autocomplete;
pub mod details;
pub mod midpoint;
pub mod photos;
pub mod places;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use midlo_core::AppConfig;
use midlo_discovery::DiscoveryConfig;
use midlo_places::{GooglePlacesClient, PlacesError};

use crate::middleware::{kpi_logging, request_id, RequestId};
use crate::photo_cache::PhotoUriCache;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when no API key is configured; handlers then either serve the
    /// deterministic mock path (development) or fail as misconfigured.
    pub places: Option<Arc<GooglePlacesClient>>,
    pub photo_cache: PhotoUriCache,
}

/// Which backing a Google-dependent handler should use for this request.
pub(super) enum GoogleBackend<'a> {
    Live(&'a GooglePlacesClient),
    Mock,
}

impl AppState {
    /// Resolves the Google backing, failing the request up front when no
    /// credential exists and mock mode is not allowed.
    pub(super) fn google_backend(&self, request_id: &str) -> Result<GoogleBackend<'_>, ApiError> {
        if let Some(client) = &self.places {
            return Ok(GoogleBackend::Live(client.as_ref()));
        }
        if self.config.mock_google_allowed() {
            return Ok(GoogleBackend::Mock);
        }
        Err(ApiError::new(
            request_id,
            "misconfigured",
            "Missing GOOGLE_MAPS_API_KEY (Google Maps Platform)",
        ))
    }

    pub(super) fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            target_unique_places: self.config.target_unique_places,
            min_rating: self.config.min_rating,
            max_total_queries: self.config.max_total_queries,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "not_found" => StatusCode::NOT_FOUND,
            "misconfigured" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a geocoding failure to a response: an unknown address is the
/// caller's problem, everything else is Google's.
pub(super) fn map_geocode_error(request_id: String, error: &PlacesError) -> ApiError {
    match error {
        PlacesError::NoGeocodeResults => ApiError::new(
            request_id,
            "bad_request",
            "Could not find that address. Try adding city/state.",
        ),
        PlacesError::Http(_) => {
            tracing::warn!(error = %error, "geocoding transport failure");
            ApiError::new(request_id, "upstream_error", "Geocoding service unavailable")
        }
        _ => {
            tracing::warn!(error = %error, "geocoding failed");
            ApiError::new(request_id, "upstream_error", "Geocoding failed")
        }
    }
}

pub(super) fn map_upstream_error(
    request_id: String,
    action: &'static str,
    error: &PlacesError,
) -> ApiError {
    tracing::warn!(error = %error, action, "google request failed");
    ApiError::new(request_id, "upstream_error", format!("{action} failed"))
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ]);

    if config.cors_allowed_origins.is_empty() {
        layer.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/midpoint", post(midpoint::midpoint))
        .route("/places", post(places::places))
        .route("/places/{place_id}", get(details::place_details))
        .route("/autocomplete", get(autocomplete::autocomplete))
        .route("/place-photo", get(photos::place_photo))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors(&state.config))
                .layer(axum::middleware::from_fn(request_id))
                .layer(axum::middleware::from_fn(kpi_logging)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    google: &'static str,
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let (status, google) = if state.places.is_some() {
        (StatusCode::OK, "configured")
    } else if state.config.mock_google_allowed() {
        (StatusCode::OK, "mock")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unconfigured")
    };

    (
        status,
        Json(ApiResponse {
            data: HealthData {
                status: if status == StatusCode::OK {
                    "ok"
                } else {
                    "degraded"
                },
                google,
            },
            meta,
        }),
    )
}
