//! Google Maps Platform response types.
//!
//! Places API v1 bodies are camelCase JSON; the classic Geocoding API uses
//! lowercase/snake keys. Every field Google documents as optional is
//! `#[serde(default)]`; partial records are normal, not errors, and the
//! discovery layer decides what is usable.

use serde::Deserialize;

/// A latitude/longitude pair as Places v1 serializes it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Places v1 localized text wrapper (`{"text": ..., "languageCode": ...}`).
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

/// One place record from a nearby or text search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlace {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub location: Option<LatLng>,
}

/// Wire shape of `places:searchNearby` / `places:searchText` responses.
/// An empty result set omits the `places` key entirely.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub places: Vec<NearbyPlace>,
}

/// One page of search results handed to the discovery layer.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub places: Vec<NearbyPlace>,
    /// Continuation token for paged search capabilities. `places:searchNearby`
    /// never returns one; the field exists so the oracle contract covers
    /// capabilities that do paginate.
    pub next_page_token: Option<String>,
}

/// Full place detail from `GET /v1/places/{place_id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_rating_count: Option<i64>,
    #[serde(default)]
    pub google_maps_uri: Option<String>,
    #[serde(default)]
    pub website_uri: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub current_opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub regular_opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

/// Opening-hours block shared by `currentOpeningHours` and
/// `regularOpeningHours`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
    #[serde(default)]
    pub weekday_descriptions: Vec<String>,
}

/// A photo reference attached to a place detail. `name` is the resource path
/// (`places/{place_id}/photos/{photo_id}`) used by the photo-media endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePhoto {
    pub name: String,
    #[serde(default)]
    pub width_px: Option<i32>,
    #[serde(default)]
    pub height_px: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Suggestion {
    #[serde(default)]
    pub place_prediction: Option<PlacePrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlacePrediction {
    pub place_id: String,
    #[serde(default)]
    pub text: Option<LocalizedText>,
}

/// A parsed autocomplete suggestion; malformed predictions are dropped
/// during parsing.
#[derive(Debug, Clone)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Geocoding API (classic web service)
// ---------------------------------------------------------------------------

/// Top-level geocoding envelope. `status` is `"OK"`, `"ZERO_RESULTS"`, or an
/// error code with an optional `error_message`.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeGeometry {
    pub location: GeocodeLocation,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotoMediaResponse {
    #[serde(default, rename = "photoUri")]
    pub photo_uri: Option<String>,
}
