//! HTTP client for the Google Maps Platform.
//!
//! One [`GooglePlacesClient`] serves every Google capability midlo consumes:
//! Places v1 nearby/text search, place details, autocomplete, photo media,
//! and classic geocoding. Timeouts are deliberately short: discovery issues
//! up to dozens of sequential searches per request, so a slow upstream call
//! must fail fast rather than stall the whole plan.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use midlo_core::Coordinate;

use crate::error::PlacesError;
use crate::types::{
    AutocompleteResponse, GeocodeResponse, PhotoMediaResponse, PlaceDetails, PlaceSuggestion,
    SearchPage, SearchResponse,
};

const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1/";
const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Field masks per endpoint; Places v1 rejects requests without one.
const SEARCH_FIELD_MASK: &str =
    "places.id,places.displayName,places.location,places.formattedAddress,places.rating";
const DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,location,rating,\
     userRatingCount,googleMapsUri,websiteUri,internationalPhoneNumber,\
     currentOpeningHours,regularOpeningHours,photos";
const AUTOCOMPLETE_FIELD_MASK: &str =
    "suggestions.placePrediction.placeId,suggestions.placePrediction.text";
const PHOTO_FIELD_MASK: &str = "photoUri";

/// Search pages are capped by Google at 20 records.
const MAX_RESULT_COUNT: u32 = 20;

/// Client for the Google Maps Platform web services.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_urls`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    places_base_url: String,
    geocode_url: Url,
}

impl GooglePlacesClient {
    /// Creates a client pointed at the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, PlacesError> {
        Self::with_base_urls(
            api_key,
            connect_timeout_secs,
            request_timeout_secs,
            DEFAULT_PLACES_BASE_URL,
            DEFAULT_GEOCODE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `geocode_url` is not a valid URL.
    pub fn with_base_urls(
        api_key: &str,
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
        places_base_url: &str,
        geocode_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent("midlo-backend/0.1 (meeting-point discovery)")
            .build()?;

        // Normalise: exactly one trailing slash, so paths like
        // "places:searchNearby" and "places/{id}" concatenate cleanly.
        // Url::join would treat the "places:" prefix as a URL scheme.
        let places_base_url = format!("{}/", places_base_url.trim_end_matches('/'));
        let geocode_url = Url::parse(geocode_url).map_err(|e| PlacesError::InvalidBaseUrl {
            url: geocode_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            places_base_url,
            geocode_url,
        })
    }

    /// Searches for places of a single category around a center point.
    ///
    /// Calls `places:searchNearby` with a circular location restriction.
    /// Returns at most [`MAX_RESULT_COUNT`] records; an empty page is a
    /// normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] on a non-2xx response.
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the response shape is unexpected.
    pub async fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: u32,
        included_type: &str,
    ) -> Result<SearchPage, PlacesError> {
        let body = serde_json::json!({
            "includedTypes": [included_type],
            "maxResultCount": MAX_RESULT_COUNT,
            "locationRestriction": Self::circle(center, radius_meters),
        });

        let url = format!("{}places:searchNearby", self.places_base_url);
        let request = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&body);

        let parsed: SearchResponse = self.send_json(request, "places:searchNearby").await?;
        // searchNearby does not return continuation tokens.
        Ok(SearchPage {
            places: parsed.places,
            next_page_token: None,
        })
    }

    /// Searches for places matching a free-text keyword, biased toward a
    /// circle around `center`.
    ///
    /// The text endpoint enforces a stricter request schema than nearby
    /// search and rejects more inputs; the default discovery plans avoid it.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::search_nearby`].
    pub async fn search_text(
        &self,
        query: &str,
        center: Coordinate,
        radius_meters: u32,
    ) -> Result<SearchPage, PlacesError> {
        let body = serde_json::json!({
            "textQuery": query,
            "maxResultCount": MAX_RESULT_COUNT,
            "locationBias": Self::circle(center, radius_meters),
        });

        let url = format!("{}places:searchText", self.places_base_url);
        let request = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&body);

        let parsed: SearchResponse = self.send_json(request, "places:searchText").await?;
        Ok(SearchPage {
            places: parsed.places,
            next_page_token: None,
        })
    }

    /// Resolves a street address to a coordinate via the Geocoding API.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::NoGeocodeResults`] when the address is unknown
    ///   (`ZERO_RESULTS`, or an OK envelope with no usable result).
    /// - [`PlacesError::GeocodeStatus`] for any other non-OK status.
    /// - [`PlacesError::Http`] / [`PlacesError::Deserialize`] as usual.
    pub async fn geocode(&self, address: &str) -> Result<Coordinate, PlacesError> {
        let url = self.geocode_request_url(address);
        let parsed: GeocodeResponse = self.send_json(self.client.get(url), "geocode").await?;

        match parsed.status.as_str() {
            "OK" => parsed
                .results
                .first()
                .map(|r| Coordinate::new(r.geometry.location.lat, r.geometry.location.lng))
                .ok_or(PlacesError::NoGeocodeResults),
            "ZERO_RESULTS" => Err(PlacesError::NoGeocodeResults),
            status => Err(PlacesError::GeocodeStatus {
                status: status.to_owned(),
                message: parsed.error_message.unwrap_or_default(),
            }),
        }
    }

    /// Fetches address predictions for a partial input.
    ///
    /// Malformed predictions (no place ID, blank text) are skipped rather
    /// than failing the whole response.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] on a non-2xx response.
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the response shape is unexpected.
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, PlacesError> {
        let body = serde_json::json!({ "input": input });

        let url = format!("{}places:autocomplete", self.places_base_url);
        let request = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", AUTOCOMPLETE_FIELD_MASK)
            .json(&body);

        let parsed: AutocompleteResponse = self.send_json(request, "places:autocomplete").await?;

        Ok(parsed
            .suggestions
            .into_iter()
            .filter_map(|s| {
                let prediction = s.place_prediction?;
                let description = prediction
                    .text
                    .map(|t| t.text)
                    .filter(|t| !t.trim().is_empty())?;
                Some(PlaceSuggestion {
                    place_id: prediction.place_id,
                    description,
                })
            })
            .collect())
    }

    /// Fetches the full detail record for one place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] on a non-2xx response (404 for unknown IDs).
    /// - [`PlacesError::Http`] on network failure or timeout.
    /// - [`PlacesError::Deserialize`] if the response shape is unexpected.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = format!("{}places/{place_id}", self.places_base_url);
        let request = self
            .client
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK);

        self.send_json(request, &format!("places/{place_id}")).await
    }

    /// Resolves a photo resource name to a short-lived Google-hosted URI.
    ///
    /// Uses `skipHttpRedirect=true` so Google returns the URI in a JSON body
    /// instead of a 302, letting midlo issue its own redirect without ever
    /// exposing the API key.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::MissingPhotoUri`] on a 2xx response without a URI.
    /// - [`PlacesError::Api`] / [`PlacesError::Http`] /
    ///   [`PlacesError::Deserialize`] as usual.
    pub async fn photo_uri(
        &self,
        name: &str,
        max_width_px: u32,
        max_height_px: Option<u32>,
    ) -> Result<String, PlacesError> {
        let url = self.photo_media_url(name, max_width_px, max_height_px);
        let request = self
            .client
            .get(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", PHOTO_FIELD_MASK);

        let parsed: PhotoMediaResponse = self.send_json(request, "photo media").await?;
        parsed
            .photo_uri
            .filter(|u| !u.trim().is_empty())
            .ok_or(PlacesError::MissingPhotoUri)
    }

    fn circle(center: Coordinate, radius_meters: u32) -> serde_json::Value {
        serde_json::json!({
            "circle": {
                "center": { "latitude": center.lat, "longitude": center.lng },
                "radius": f64::from(radius_meters),
            }
        })
    }

    /// Builds the geocoding URL with properly percent-encoded parameters.
    fn geocode_request_url(&self, address: &str) -> Url {
        let mut url = self.geocode_url.clone();
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    fn photo_media_url(&self, name: &str, max_width_px: u32, max_height_px: Option<u32>) -> String {
        let mut url = format!(
            "{}{name}/media?skipHttpRedirect=true&maxWidthPx={max_width_px}",
            self.places_base_url
        );
        if let Some(h) = max_height_px {
            url.push_str(&format!("&maxHeightPx={h}"));
        }
        url
    }

    /// Sends a request, asserts a 2xx status, and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Api`] with the body preserved on a non-2xx
    /// status, [`PlacesError::Http`] on transport failure, and
    /// [`PlacesError::Deserialize`] if the body does not match `T`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, PlacesError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body.trim().to_owned(),
            });
        }

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(places_base: &str) -> GooglePlacesClient {
        GooglePlacesClient::with_base_urls(
            "test-key",
            4,
            8,
            places_base,
            "https://maps.googleapis.com/maps/api/geocode/json",
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn base_url_gains_exactly_one_trailing_slash() {
        let client = test_client("https://places.googleapis.com/v1");
        assert_eq!(client.places_base_url, "https://places.googleapis.com/v1/");

        let client = test_client("https://places.googleapis.com/v1///");
        assert_eq!(client.places_base_url, "https://places.googleapis.com/v1/");
    }

    #[test]
    fn geocode_url_encodes_address_and_key() {
        let client = test_client("https://places.googleapis.com/v1");
        let url = client.geocode_request_url("1600 Amphitheatre Pkwy & Main");
        let s = url.as_str();
        assert!(s.contains("key=test-key"), "missing key: {s}");
        assert!(
            s.contains("1600+Amphitheatre+Pkwy+%26+Main")
                || s.contains("1600%20Amphitheatre%20Pkwy%20%26%20Main"),
            "address should be percent-encoded: {s}"
        );
    }

    #[test]
    fn photo_media_url_includes_dimensions() {
        let client = test_client("https://places.googleapis.com/v1");
        let url = client.photo_media_url("places/abc/photos/xyz", 1200, Some(800));
        assert_eq!(
            url,
            "https://places.googleapis.com/v1/places/abc/photos/xyz/media\
             ?skipHttpRedirect=true&maxWidthPx=1200&maxHeightPx=800"
        );
    }

    #[test]
    fn photo_media_url_omits_height_when_absent() {
        let client = test_client("https://places.googleapis.com/v1");
        let url = client.photo_media_url("places/abc/photos/xyz", 640, None);
        assert!(!url.contains("maxHeightPx"), "unexpected height: {url}");
    }

    #[test]
    fn invalid_geocode_url_is_rejected() {
        let result = GooglePlacesClient::with_base_urls(
            "k",
            4,
            8,
            "https://places.googleapis.com/v1",
            "not a url",
        );
        assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn circle_radius_is_numeric_meters() {
        let circle = GooglePlacesClient::circle(Coordinate::new(44.95, -93.1), 8_000);
        assert!((circle["circle"]["radius"].as_f64().unwrap() - 8_000.0).abs() < f64::EPSILON);
        assert!((circle["circle"]["center"]["latitude"].as_f64().unwrap() - 44.95).abs() < 1e-9);
    }
}
