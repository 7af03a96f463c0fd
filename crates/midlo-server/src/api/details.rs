//! Single-place detail lookup.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;

use midlo_places::{PlaceDetails, PlacesError};

use crate::api::{map_upstream_error, ApiError, ApiResponse, AppState, GoogleBackend, ResponseMeta};
use crate::middleware::RequestId;
use crate::mock;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsResponse {
    pub place_id: String,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i64>,
    pub google_maps_uri: Option<String>,
    pub website_uri: Option<String>,
    pub international_phone_number: Option<String>,
    pub open_now: Option<bool>,
    pub weekday_descriptions: Option<Vec<String>>,
    pub photos: Option<Vec<PhotoRef>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub name: String,
    pub width_px: Option<i32>,
    pub height_px: Option<i32>,
}

pub async fn place_details(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(place_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(ApiError::new(&req_id.0, "bad_request", "Missing placeId"));
    }

    let data = match state.google_backend(&req_id.0)? {
        GoogleBackend::Live(client) => {
            let details = client
                .place_details(place_id)
                .await
                .map_err(|e| map_details_error(req_id.0.clone(), &e))?;
            from_details(place_id, details)
        }
        GoogleBackend::Mock => mock::mock_place_details(place_id),
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_details_error(request_id: String, error: &PlacesError) -> ApiError {
    if let PlacesError::Api { status: 404, .. } = error {
        return ApiError::new(request_id, "not_found", "No place with that ID");
    }
    map_upstream_error(request_id, "Place details", error)
}

/// Flattens the Google record into the response shape. Weekday descriptions
/// prefer regular hours and fall back to current hours; blank entries are
/// dropped either way.
fn from_details(requested_id: &str, details: PlaceDetails) -> PlaceDetailsResponse {
    let open_now = details
        .current_opening_hours
        .as_ref()
        .and_then(|h| h.open_now);

    let weekday_descriptions = [&details.regular_opening_hours, &details.current_opening_hours]
        .into_iter()
        .flatten()
        .map(|hours| {
            hours
                .weekday_descriptions
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(ToOwned::to_owned)
                .collect::<Vec<String>>()
        })
        .find(|descriptions| !descriptions.is_empty());

    let photos: Vec<PhotoRef> = details
        .photos
        .into_iter()
        .filter(|p| !p.name.trim().is_empty())
        .map(|p| PhotoRef {
            name: p.name,
            width_px: p.width_px,
            height_px: p.height_px,
        })
        .collect();

    let id = if details.id.is_empty() {
        requested_id.to_owned()
    } else {
        details.id
    };

    PlaceDetailsResponse {
        place_id: id,
        name: details.display_name.map(|d| d.text),
        formatted_address: details.formatted_address,
        lat: details.location.map_or(0.0, |l| l.latitude),
        lng: details.location.map_or(0.0, |l| l.longitude),
        rating: details.rating,
        user_rating_count: details.user_rating_count,
        google_maps_uri: details.google_maps_uri,
        website_uri: details.website_uri,
        international_phone_number: details.international_phone_number,
        open_now,
        weekday_descriptions,
        photos: if photos.is_empty() {
            None
        } else {
            Some(photos)
        },
    }
}

#[cfg(test)]
mod tests {
    use midlo_places::{LatLng, LocalizedText, OpeningHours, PlacePhoto};

    use super::*;

    fn base_details() -> PlaceDetails {
        PlaceDetails {
            id: "det-1".to_owned(),
            display_name: Some(LocalizedText {
                text: "Surly Brewing".to_owned(),
            }),
            formatted_address: Some("520 Malcolm Ave SE".to_owned()),
            location: Some(LatLng {
                latitude: 44.97,
                longitude: -93.21,
            }),
            rating: Some(4.6),
            user_rating_count: Some(9_800),
            google_maps_uri: None,
            website_uri: None,
            international_phone_number: None,
            current_opening_hours: None,
            regular_opening_hours: None,
            photos: vec![],
        }
    }

    #[test]
    fn weekday_descriptions_prefer_regular_hours() {
        let mut details = base_details();
        details.regular_opening_hours = Some(OpeningHours {
            open_now: None,
            weekday_descriptions: vec!["Monday: 9–5".to_owned()],
        });
        details.current_opening_hours = Some(OpeningHours {
            open_now: Some(true),
            weekday_descriptions: vec!["Holiday: closed".to_owned()],
        });

        let response = from_details("det-1", details);
        assert_eq!(
            response.weekday_descriptions,
            Some(vec!["Monday: 9–5".to_owned()])
        );
        assert_eq!(response.open_now, Some(true));
    }

    #[test]
    fn weekday_descriptions_fall_back_to_current_hours() {
        let mut details = base_details();
        details.current_opening_hours = Some(OpeningHours {
            open_now: Some(false),
            weekday_descriptions: vec!["  ".to_owned(), "Tuesday: 10–4".to_owned()],
        });

        let response = from_details("det-1", details);
        assert_eq!(
            response.weekday_descriptions,
            Some(vec!["Tuesday: 10–4".to_owned()])
        );
    }

    #[test]
    fn blank_photo_names_are_dropped_and_empty_list_becomes_none() {
        let mut details = base_details();
        details.photos = vec![PlacePhoto {
            name: "  ".to_owned(),
            width_px: None,
            height_px: None,
        }];

        let response = from_details("det-1", details);
        assert!(response.photos.is_none());
    }

    #[test]
    fn missing_location_defaults_to_zero() {
        let mut details = base_details();
        details.location = None;
        let response = from_details("det-1", details);
        assert!(response.lat.abs() < f64::EPSILON);
        assert!(response.lng.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_id_falls_back_to_the_requested_one() {
        let mut details = base_details();
        details.id = String::new();
        let response = from_details("requested-id", details);
        assert_eq!(response.place_id, "requested-id");
    }
}
