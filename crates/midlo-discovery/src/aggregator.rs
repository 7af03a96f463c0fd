//! The discovery control loop.
//!
//! Drives the planner against the oracle one query at a time, merging
//! results by place identity and stopping the moment enough usable unique
//! venues exist. Two escalation axes keep rural midpoints from starving:
//! radius tiers first, then a ring of shifted search centers. A hard query
//! budget bounds worst-case latency and cost no matter what the oracle does.

use midlo_core::Coordinate;
use midlo_places::{PlacesError, SearchPage};
use rand::Rng;
use thiserror::Error;

use crate::candidate::{Candidate, CandidatePool};
use crate::geo;
use crate::oracle::PlaceOracle;
use crate::planner::{self, QueryKind, QuerySpec, MAX_RADIUS_METERS, RADIUS_PLAN_METERS};

/// Offsets for the fallback search-center rings, nearest first.
pub const FALLBACK_CENTER_OFFSETS_METERS: [u32; 4] = [35_000, 80_000, 150_000, 250_000];

/// Tunables for one discovery run. The defaults are the product constants;
/// they are named configuration rather than inline literals because the
/// rating floor and target count are policy, not geometry.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Stop searching once this many unique usable candidates exist.
    pub target_unique_places: usize,
    /// Rating floor for the quality count and filter; absent ratings pass.
    pub min_rating: f64,
    /// Hard ceiling on oracle calls per request, counting failures.
    pub max_total_queries: u32,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            target_unique_places: 30,
            min_rating: 2.5,
            max_total_queries: 40,
        }
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Every avenue was tried, nothing was found, and at least one query
    /// failed, so the emptiness cannot be trusted.
    #[error("place discovery produced no candidates: {0}")]
    Oracle(#[source] PlacesError),
}

/// Runs the aggregation loop and returns the merged candidate pool.
///
/// The pool may contain coordinate-less candidates and may hold fewer than
/// the target; [`crate::select_candidates`] decides what survives.
///
/// # Errors
///
/// Returns [`DiscoveryError::Oracle`] with the last recorded failure only
/// when the pool is empty AND at least one oracle call failed. An empty
/// pool from a healthy oracle is `Ok(vec![])`.
pub async fn discover<O, R>(
    oracle: &O,
    midpoint: Coordinate,
    config: &DiscoveryConfig,
    rng: &mut R,
) -> Result<Vec<Candidate>, DiscoveryError>
where
    O: PlaceOracle + ?Sized,
    R: Rng + Send,
{
    let mut pool = CandidatePool::new();
    let mut queries_run: u32 = 0;
    let mut last_failure: Option<PlacesError> = None;

    'rounds: for nominal_radius in RADIUS_PLAN_METERS {
        let round = planner::plan_round(midpoint, nominal_radius, rng);
        for query in round {
            if queries_run >= config.max_total_queries {
                break 'rounds;
            }
            queries_run += 1;

            match oracle.search(&query).await {
                Ok(page) => merge_page(&mut pool, midpoint, page),
                Err(e) => {
                    tracing::warn!(
                        category = %query.value,
                        radius_meters = query.radius_meters,
                        error = %e,
                        "nearby query failed; skipping"
                    );
                    last_failure = Some(e);
                    continue;
                }
            }

            if pool.count_high_quality(config.min_rating) >= config.target_unique_places
                || pool.count_with_coordinates() >= config.target_unique_places
            {
                break 'rounds;
            }
        }
    }

    // The radius plan can still under-deliver when the midpoint lands in a
    // sparse gap between towns; shift the search window outward instead of
    // giving up. Distances stay anchored to the true midpoint.
    if pool.count_with_coordinates() < config.target_unique_places
        && queries_run < config.max_total_queries
    {
        let mut centers: Vec<Coordinate> = Vec::new();
        for offset in FALLBACK_CENTER_OFFSETS_METERS {
            centers.extend(geo::fallback_centers(midpoint, offset));
        }
        let centers = geo::dedup_centers(centers);
        let categories = planner::fallback_pass_categories(rng);

        'centers: for center in centers {
            for category in &categories {
                if queries_run >= config.max_total_queries {
                    break 'centers;
                }
                queries_run += 1;

                let query = QuerySpec {
                    kind: QueryKind::NearbyCategory,
                    value: (*category).to_owned(),
                    center,
                    radius_meters: MAX_RADIUS_METERS,
                    page_token: None,
                };

                match oracle.search(&query).await {
                    Ok(page) => merge_page(&mut pool, midpoint, page),
                    Err(e) => {
                        tracing::warn!(
                            category = %category,
                            center_lat = center.lat,
                            center_lng = center.lng,
                            error = %e,
                            "fallback-center query failed; skipping"
                        );
                        last_failure = Some(e);
                        continue;
                    }
                }

                if pool.count_with_coordinates() >= config.target_unique_places {
                    break 'centers;
                }
            }
        }
    }

    if pool.is_empty() {
        if let Some(failure) = last_failure {
            return Err(DiscoveryError::Oracle(failure));
        }
    }

    tracing::debug!(
        candidates = pool.len(),
        with_coordinates = pool.count_with_coordinates(),
        queries_run,
        "discovery loop finished"
    );
    Ok(pool.into_candidates())
}

/// Merges one oracle page into the pool, first-seen wins.
///
/// Distance is computed here, from the midpoint the user asked about,
/// never from the search center that happened to find the record.
fn merge_page(pool: &mut CandidatePool, midpoint: Coordinate, page: SearchPage) {
    for place in page.places {
        let Some(name) = place.display_name.map(|d| d.text) else {
            continue;
        };
        let location = place
            .location
            .map(|l| Coordinate::new(l.latitude, l.longitude));
        let distance_meters =
            location.map_or(f64::INFINITY, |loc| geo::haversine_meters(midpoint, loc));

        pool.insert_if_absent(Candidate {
            place_id: place.id,
            name,
            formatted_address: place.formatted_address.filter(|a| !a.trim().is_empty()),
            rating: place.rating,
            location,
            distance_meters,
        });
    }
}
