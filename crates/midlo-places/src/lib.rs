//! Typed client for the Google Maps Platform web services used by midlo:
//! Places API v1 (nearby/text search, details, autocomplete, photo media)
//! and the classic Geocoding API.
//!
//! Wraps `reqwest` with Google-specific error handling, key management, and
//! typed response deserialization. Places v1 requests always send an
//! `X-Goog-FieldMask` header (Google rejects unmasked requests), and
//! non-2xx responses are surfaced as [`PlacesError::Api`] with the response
//! body preserved for diagnosis.

mod client;
mod error;
mod types;

pub use client::GooglePlacesClient;
pub use error::PlacesError;
pub use types::{
    GeocodeGeometry, GeocodeLocation, GeocodeResponse, GeocodeResult, LatLng, LocalizedText,
    NearbyPlace, OpeningHours, PlaceDetails, PlacePhoto, PlaceSuggestion, SearchPage,
};
