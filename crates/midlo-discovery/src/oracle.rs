//! The place-search oracle seam.
//!
//! Discovery treats the search capability as an opaque, quota-limited
//! collaborator: one bounded query in, at most one small page of partial
//! place records out. The trait exists so the control loop can be exercised
//! against scripted in-memory oracles in tests.

use async_trait::async_trait;

use midlo_places::{GooglePlacesClient, PlacesError, SearchPage};

use crate::planner::{QueryKind, QuerySpec};

/// A place-search capability. Implementations may fail per call (transport,
/// quota, non-success status); the aggregator recovers by skipping.
#[async_trait]
pub trait PlaceOracle: Send + Sync {
    async fn search(&self, query: &QuerySpec) -> Result<SearchPage, PlacesError>;
}

#[async_trait]
impl PlaceOracle for GooglePlacesClient {
    async fn search(&self, query: &QuerySpec) -> Result<SearchPage, PlacesError> {
        match query.kind {
            QueryKind::NearbyCategory => {
                self.search_nearby(query.center, query.radius_meters, &query.value)
                    .await
            }
            QueryKind::TextKeyword => {
                self.search_text(&query.value, query.center, query.radius_meters)
                    .await
            }
        }
    }
}
