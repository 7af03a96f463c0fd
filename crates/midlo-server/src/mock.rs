//! Deterministic mock Google responses for keyless local development.
//!
//! When no API key is configured and the environment allows it, every
//! Google-backed endpoint serves stable, input-derived fake data so the
//! frontend can be developed offline. This path entirely bypasses the real
//! discovery pipeline and never runs when a key exists.

use sha2::{Digest, Sha256};

use midlo_core::Coordinate;
use midlo_discovery::PresentedPlace;

use crate::api::autocomplete::AutocompleteSuggestion;
use crate::api::details::PlaceDetailsResponse;

fn hash_u32(input: &str) -> u32 {
    let digest = Sha256::digest(input.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

fn hash_fraction(input: &str) -> f64 {
    f64::from(hash_u32(input)) / f64::from(u32::MAX)
}

/// Deterministic pseudo-geocode, roughly within the contiguous US.
pub fn mock_coordinate(address: &str) -> Coordinate {
    let r1 = hash_fraction(&format!("A|{address}"));
    let r2 = hash_fraction(&format!("B|{address}"));
    Coordinate::new(24.0 + r1 * 25.0, -125.0 + r2 * 59.0)
}

/// Five fixed-shape places offset from the request point so map markers
/// look realistic.
pub fn mock_places(midpoint: Coordinate) -> Vec<PresentedPlace> {
    let place = |id: &str, name: &str, distance: &str, d_lat: f64, d_lng: f64| PresentedPlace {
        place_id: id.to_owned(),
        name: name.to_owned(),
        distance: distance.to_owned(),
        lat: midpoint.lat + d_lat,
        lng: midpoint.lng + d_lng,
    };

    vec![
        place("mock_place_1", "Mock Cafe", "0.4 mi", 0.0032, -0.0021),
        place("mock_place_2", "Mock Restaurant", "0.7 mi", -0.0041, 0.0019),
        place("mock_place_3", "Mock Bar", "1.1 mi", 0.0014, 0.0042),
        place("mock_place_4", "Mock Bakery", "1.6 mi", -0.0053, -0.0038),
        place("mock_place_5", "Mock Coffee", "2.0 mi", 0.0061, 0.0007),
    ]
}

/// A small, deterministic suggestion list for UI testing.
pub fn mock_suggestions(input: &str) -> Vec<AutocompleteSuggestion> {
    let base = input.split_whitespace().collect::<Vec<_>>().join(" ");
    vec![
        AutocompleteSuggestion {
            place_id: format!("mock_{:08x}", hash_u32(&format!("1|{base}"))),
            description: format!("{base} (mock)"),
        },
        AutocompleteSuggestion {
            place_id: format!("mock_{:08x}", hash_u32(&format!("2|{base}"))),
            description: format!("{base} Downtown (mock)"),
        },
    ]
}

/// Fixed-shape detail record echoing the requested place ID.
pub fn mock_place_details(place_id: &str) -> PlaceDetailsResponse {
    PlaceDetailsResponse {
        place_id: place_id.to_owned(),
        name: Some("Mock Place Details".to_owned()),
        formatted_address: Some("123 Mock St, Test City".to_owned()),
        lat: 0.0,
        lng: 0.0,
        rating: Some(4.6),
        user_rating_count: Some(128),
        google_maps_uri: Some("https://maps.google.com".to_owned()),
        website_uri: None,
        international_phone_number: None,
        open_now: None,
        weekday_descriptions: Some(vec![
            "Mon–Fri: 9:00 AM – 6:00 PM".to_owned(),
            "Sat–Sun: 10:00 AM – 4:00 PM".to_owned(),
        ]),
        photos: None,
    }
}

/// A placeholder image URL at the requested dimensions.
pub fn mock_photo_uri(width_px: u32, height_px: u32) -> String {
    format!("https://placehold.co/{width_px}x{height_px}?text=Midlo%20Mock%20Photo")
}
