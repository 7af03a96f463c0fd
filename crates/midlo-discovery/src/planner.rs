//! Query planning: escalating radius rounds over curated place categories.
//!
//! The plan is data, a tagged list of (kind, value) query specs, so the
//! aggregator and tests can drive it without knowing anything about the
//! concrete search capability behind the oracle.

use midlo_core::Coordinate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Dining/entertainment categories tried at every radius tier.
pub const PRIMARY_CATEGORIES: [&str; 12] = [
    "restaurant",
    "cafe",
    "bar",
    "bakery",
    "meal_takeaway",
    "meal_delivery",
    "park",
    "tourist_attraction",
    "movie_theater",
    "bowling_alley",
    "museum",
    "shopping_mall",
];

/// Essentials for rural areas where the fun categories may not exist nearby.
pub const FALLBACK_CATEGORIES: [&str; 6] = [
    "gas_station",
    "supermarket",
    "grocery_store",
    "convenience_store",
    "lodging",
    "pharmacy",
];

/// Hard radius ceiling the nearby-search capability enforces.
pub const MAX_RADIUS_METERS: u32 = 50_000;

/// Ascending radius tiers; cheap close-in queries run before broad ones.
pub const RADIUS_PLAN_METERS: [u32; 5] = [8_000, 15_000, 25_000, 40_000, MAX_RADIUS_METERS];

/// Fallback categories join the plan only once the radius reaches this, so
/// relevant queries are exhausted before broadening scope.
pub const FALLBACK_CATEGORY_THRESHOLD_METERS: u32 = 25_000;

/// How a query value should be interpreted by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// A nearby-search category type, e.g. `"restaurant"`.
    NearbyCategory,
    /// A free-text keyword for the text-search capability. The default
    /// plans never emit these (the text endpoint's stricter request
    /// schema rejects more inputs) but the oracle contract covers them.
    TextKeyword,
}

/// One planned oracle call.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub kind: QueryKind,
    pub value: String,
    pub center: Coordinate,
    pub radius_meters: u32,
    /// Continuation token for paged capabilities; nearby search never
    /// supplies one, so the aggregator does not follow tokens.
    pub page_token: Option<String>,
}

/// Builds one round of shuffled category queries at a nominal radius.
///
/// Order is randomized (not input-dependent) to avoid systematically
/// favouring one category, and each radius is jittered so repeat requests
/// for the same midpoint don't issue byte-identical query sequences.
pub fn plan_round<R: Rng>(
    center: Coordinate,
    nominal_radius_meters: u32,
    rng: &mut R,
) -> Vec<QuerySpec> {
    let mut categories: Vec<&str> = PRIMARY_CATEGORIES.to_vec();
    if nominal_radius_meters >= FALLBACK_CATEGORY_THRESHOLD_METERS {
        categories.extend(FALLBACK_CATEGORIES);
    }
    categories.shuffle(rng);

    categories
        .into_iter()
        .map(|value| QuerySpec {
            kind: QueryKind::NearbyCategory,
            value: value.to_owned(),
            center,
            radius_meters: jitter_radius(nominal_radius_meters, rng),
            page_token: None,
        })
        .collect()
}

/// The shuffled full category list (essentials and primary together) used
/// by the fallback-center pass.
pub fn fallback_pass_categories<R: Rng>(rng: &mut R) -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = FALLBACK_CATEGORIES.to_vec();
    categories.extend(PRIMARY_CATEGORIES);
    categories.shuffle(rng);
    categories
}

/// Randomizes a radius within 90–100% of nominal, clamped to the ceiling
/// the search capability enforces and floored at one meter.
pub fn jitter_radius<R: Rng>(nominal_radius_meters: u32, rng: &mut R) -> u32 {
    let factor = rng.random_range(0.90..=1.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "rounded product of a u32 and a factor <= 1.0 fits in u32"
    )]
    let jittered = (f64::from(nominal_radius_meters) * factor).round() as u32;
    jittered.clamp(1, MAX_RADIUS_METERS)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn center() -> Coordinate {
        Coordinate::new(44.95, -93.1)
    }

    #[test]
    fn radius_plan_is_ascending_and_capped() {
        let mut prev = 0;
        for radius in RADIUS_PLAN_METERS {
            assert!(radius > prev, "plan must ascend");
            assert!(radius <= MAX_RADIUS_METERS);
            prev = radius;
        }
    }

    #[test]
    fn close_rounds_use_only_primary_categories() {
        let mut rng = StdRng::seed_from_u64(7);
        let round = plan_round(center(), 8_000, &mut rng);
        assert_eq!(round.len(), PRIMARY_CATEGORIES.len());
        for spec in &round {
            assert_eq!(spec.kind, QueryKind::NearbyCategory);
            assert!(PRIMARY_CATEGORIES.contains(&spec.value.as_str()));
        }
    }

    #[test]
    fn wide_rounds_add_fallback_categories() {
        let mut rng = StdRng::seed_from_u64(7);
        let round = plan_round(center(), FALLBACK_CATEGORY_THRESHOLD_METERS, &mut rng);
        assert_eq!(
            round.len(),
            PRIMARY_CATEGORIES.len() + FALLBACK_CATEGORIES.len()
        );

        let mut values: Vec<&str> = round.iter().map(|s| s.value.as_str()).collect();
        values.sort_unstable();
        let mut expected: Vec<&str> = PRIMARY_CATEGORIES
            .iter()
            .chain(FALLBACK_CATEGORIES.iter())
            .copied()
            .collect();
        expected.sort_unstable();
        assert_eq!(values, expected, "each category appears exactly once");
    }

    #[test]
    fn plan_order_is_deterministic_under_a_fixed_seed() {
        let first: Vec<String> = plan_round(center(), 15_000, &mut StdRng::seed_from_u64(42))
            .into_iter()
            .map(|s| s.value)
            .collect();
        let second: Vec<String> = plan_round(center(), 15_000, &mut StdRng::seed_from_u64(42))
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn jitter_stays_within_ninety_to_hundred_percent() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let r = jitter_radius(40_000, &mut rng);
            assert!((36_000..=40_000).contains(&r), "jittered radius {r}");
        }
    }

    #[test]
    fn jitter_never_exceeds_the_ceiling() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(jitter_radius(MAX_RADIUS_METERS, &mut rng) <= MAX_RADIUS_METERS);
            // Even a nominal radius above the ceiling is clamped.
            assert!(jitter_radius(80_000, &mut rng) <= MAX_RADIUS_METERS);
        }
    }

    #[test]
    fn fallback_pass_covers_every_category_once() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut categories = fallback_pass_categories(&mut rng);
        categories.sort_unstable();
        let mut expected: Vec<&str> = FALLBACK_CATEGORIES
            .iter()
            .chain(PRIMARY_CATEGORIES.iter())
            .copied()
            .collect();
        expected.sort_unstable();
        assert_eq!(categories, expected);
    }
}
