//! Place discovery around a meeting midpoint.
//!
//! A single nearby-search query returns a small, capped, possibly-empty page,
//! so one query is never enough to promise users a usable set of venues.
//! This crate turns one coordinate into a target-sized, deduplicated,
//! quality-filtered venue list by issuing a bounded sequence of searches
//! with escalating radius and, when a region is genuinely sparse, shifted
//! search centers.
//!
//! Pipeline: [`planner`] builds randomized query rounds, [`discover`] drives
//! them against a [`PlaceOracle`] and merges results by place identity,
//! [`select_candidates`] applies quality filtering and name+address dedup,
//! and [`present`] shuffles, caps, and formats the final list.

mod aggregator;
mod candidate;
mod filter;
pub mod geo;
mod oracle;
pub mod planner;
mod present;

pub use aggregator::{discover, DiscoveryConfig, DiscoveryError, FALLBACK_CENTER_OFFSETS_METERS};
pub use candidate::{Candidate, CandidatePool};
pub use filter::{dedupe_by_name_address, normalize_key, select_candidates};
pub use oracle::PlaceOracle;
pub use planner::{QueryKind, QuerySpec};
pub use present::{format_distance_miles, present, PresentedPlace};

use midlo_core::Coordinate;
use rand::Rng;

/// Runs the full discovery pipeline: aggregate, filter, present.
///
/// # Errors
///
/// Returns [`DiscoveryError`] only when the merged pool ends up empty AND at
/// least one oracle query failed; an empty result from a healthy oracle is a
/// valid empty list.
pub async fn discover_places<O, R>(
    oracle: &O,
    midpoint: Coordinate,
    config: &DiscoveryConfig,
    rng: &mut R,
) -> Result<Vec<PresentedPlace>, DiscoveryError>
where
    O: PlaceOracle + ?Sized,
    R: Rng + Send,
{
    let pool = discover(oracle, midpoint, config, rng).await?;
    let selected = select_candidates(pool, config);
    Ok(present(selected, config.target_unique_places, rng))
}
