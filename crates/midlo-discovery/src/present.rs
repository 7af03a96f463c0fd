//! Final response shaping: shuffle, cap, and format distances.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::candidate::Candidate;

const METERS_PER_MILE: f64 = 1_609.344;

/// One venue as the API boundary serializes it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentedPlace {
    pub place_id: String,
    pub name: String,
    pub distance: String,
    pub lat: f64,
    pub lng: f64,
}

/// Shuffles the filtered set (repeat requests for the same midpoint should
/// not always lead with the same few venues), then truncates to the target
/// count and formats distances for display.
pub fn present<R: Rng>(
    mut candidates: Vec<Candidate>,
    target: usize,
    rng: &mut R,
) -> Vec<PresentedPlace> {
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .filter_map(|c| {
            let location = c.location?;
            Some(PresentedPlace {
                place_id: c.place_id,
                name: c.name,
                distance: format_distance_miles(c.distance_meters),
                lat: location.lat,
                lng: location.lng,
            })
        })
        .take(target)
        .collect()
}

/// Formats a distance in meters as miles with one decimal place.
#[must_use]
pub fn format_distance_miles(meters: f64) -> String {
    format!("{:.1} mi", meters / METERS_PER_MILE)
}
