//! Candidate model and the per-request merge pool.

use std::collections::HashMap;

use midlo_core::Coordinate;

/// One discovered venue, keyed by its external place identity.
///
/// Candidates are created only from oracle responses and never mutated; the
/// pool inserts them if absent and the filter stage decides what survives.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    /// External 0.0–5.0 rating; absent is common for new or obscure venues.
    pub rating: Option<f64>,
    /// Absent coordinate makes the candidate unusable; it is kept in the
    /// pool for counting honesty but dropped before presentation.
    pub location: Option<Coordinate>,
    /// Great-circle distance from the TRUE midpoint, never from whichever
    /// search center happened to discover the candidate. Infinity when the
    /// record has no coordinate.
    pub distance_meters: f64,
}

impl Candidate {
    /// Usable and not disqualified by rating. An absent rating is
    /// acceptable, not disqualifying.
    pub(crate) fn is_high_quality(&self, min_rating: f64) -> bool {
        self.location.is_some() && self.rating.is_none_or(|r| r >= min_rating)
    }
}

/// Per-request candidate store keyed by place ID. Lives for one discovery
/// request and is discarded after the response is built.
#[derive(Debug, Default)]
pub struct CandidatePool {
    by_place_id: HashMap<String, Candidate>,
}

impl CandidatePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First-seen wins: a candidate already present under the same place ID
    /// is never replaced.
    pub fn insert_if_absent(&mut self, candidate: Candidate) {
        self.by_place_id
            .entry(candidate.place_id.clone())
            .or_insert(candidate);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_place_id.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_place_id.len()
    }

    /// Candidates that carry a usable coordinate.
    #[must_use]
    pub fn count_with_coordinates(&self) -> usize {
        self.by_place_id
            .values()
            .filter(|c| c.location.is_some())
            .count()
    }

    /// Candidates with a coordinate that also pass the rating floor
    /// (or carry no rating at all).
    #[must_use]
    pub fn count_high_quality(&self, min_rating: f64) -> usize {
        self.by_place_id
            .values()
            .filter(|c| c.is_high_quality(min_rating))
            .count()
    }

    #[must_use]
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.by_place_id.into_values().collect()
    }
}
