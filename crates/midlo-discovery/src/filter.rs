//! Quality filtering and duplicate collapse for merged candidates.
//!
//! The guiding rule: never return fewer venues than the pool can support.
//! Rating filtering and name+address dedup both fall back to wider pools
//! whenever applying them would push the result below the target.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::aggregator::DiscoveryConfig;
use crate::candidate::Candidate;

/// Normalizes a name or address into a dedup key: lowercased, punctuation
/// replaced by spaces, whitespace collapsed. Idempotent.
#[must_use]
pub fn normalize_key(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mapped: String = lowered
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapses near-duplicate listings sharing a normalized name+address;
/// chain locations and data variants can carry distinct place IDs.
///
/// Candidates missing a usable name or address are keyed by place ID alone
/// and never coalesced. On collision the higher-rated candidate wins; on a
/// rating tie, the one closer to the midpoint.
#[must_use]
pub fn dedupe_by_name_address(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut best_by_key: HashMap<String, Candidate> = HashMap::new();

    for candidate in candidates {
        let name_key = normalize_key(&candidate.name);
        let address_key = candidate
            .formatted_address
            .as_deref()
            .map(normalize_key)
            .unwrap_or_default();

        if name_key.is_empty() || address_key.is_empty() {
            // Identity-only key: place-id dedup already protected these.
            best_by_key
                .entry(format!("pid:{}", candidate.place_id))
                .or_insert(candidate);
            continue;
        }

        match best_by_key.entry(format!("{name_key}|{address_key}")) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if prefer_replacement(slot.get(), &candidate) {
                    slot.insert(candidate);
                }
            }
        }
    }

    best_by_key.into_values().collect()
}

/// Higher rating wins; on a tie the closer candidate wins. Absent ratings
/// rank below any real rating.
fn prefer_replacement(existing: &Candidate, challenger: &Candidate) -> bool {
    let existing_rating = existing.rating.unwrap_or(-1.0);
    let challenger_rating = challenger.rating.unwrap_or(-1.0);
    if challenger_rating > existing_rating {
        return true;
    }
    (challenger_rating - existing_rating).abs() < f64::EPSILON
        && challenger.distance_meters < existing.distance_meters
}

/// Turns the raw merged pool into the final candidate set.
///
/// 1. Drop coordinate-less candidates unconditionally.
/// 2. Apply the rating floor only if the filtered pool still meets the
///    target; otherwise keep the full coordinate-having set.
/// 3. Dedup by normalized name+address.
/// 4. If dedup pushed a rating-filtered pool below target, redo the dedup
///    against the unfiltered set to recover volume.
#[must_use]
pub fn select_candidates(pool: Vec<Candidate>, config: &DiscoveryConfig) -> Vec<Candidate> {
    let with_coordinates: Vec<Candidate> =
        pool.into_iter().filter(|c| c.location.is_some()).collect();

    let rating_filtered: Vec<Candidate> = with_coordinates
        .iter()
        .filter(|c| c.rating.is_none_or(|r| r >= config.min_rating))
        .cloned()
        .collect();

    let use_rating_pool = rating_filtered.len() >= config.target_unique_places;
    let quality_pool = if use_rating_pool {
        rating_filtered
    } else {
        with_coordinates.clone()
    };

    let deduped = dedupe_by_name_address(quality_pool);
    if deduped.len() < config.target_unique_places && use_rating_pool {
        // Name+address dedup pushed us under target; relax the rating
        // filter to preserve variety.
        return dedupe_by_name_address(with_coordinates);
    }
    deduped
}

#[cfg(test)]
mod tests {
    use midlo_core::Coordinate;

    use super::*;

    fn candidate(place_id: &str, name: &str, address: Option<&str>, rating: Option<f64>) -> Candidate {
        Candidate {
            place_id: place_id.to_owned(),
            name: name.to_owned(),
            formatted_address: address.map(ToOwned::to_owned),
            rating,
            location: Some(Coordinate::new(44.9, -93.1)),
            distance_meters: 1_000.0,
        }
    }

    fn config(target: usize) -> DiscoveryConfig {
        DiscoveryConfig {
            target_unique_places: target,
            ..DiscoveryConfig::default()
        }
    }

    fn sorted_ids(candidates: &[Candidate]) -> Vec<&str> {
        let mut ids: Vec<&str> = candidates.iter().map(|c| c.place_id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn normalize_key_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize_key("The Blue-Door  Pub!"), "the blue door pub");
        assert_eq!(normalize_key("  1811  Selby Ave. "), "1811 selby ave");
        assert_eq!(normalize_key("***"), "");
    }

    #[test]
    fn normalize_key_is_idempotent() {
        let once = normalize_key("Café  #42, Main St.");
        assert_eq!(normalize_key(&once), once);
    }

    #[test]
    fn coordinate_less_candidates_are_dropped() {
        let mut ghost = candidate("ghost", "Ghost", Some("1 Void Rd"), Some(5.0));
        ghost.location = None;
        let real = candidate("real", "Real", Some("2 Main St"), Some(4.0));

        let out = select_candidates(vec![ghost, real], &config(30));
        assert_eq!(sorted_ids(&out), vec!["real"]);
    }

    #[test]
    fn rating_filter_applies_when_volume_allows() {
        let mut pool: Vec<Candidate> = (0..5)
            .map(|i| {
                candidate(
                    &format!("good-{i}"),
                    &format!("Good {i}"),
                    Some(&format!("{i} Good St")),
                    Some(4.0),
                )
            })
            .collect();
        pool.push(candidate("bad", "Bad", Some("9 Bad St"), Some(1.0)));

        let out = select_candidates(pool, &config(5));
        assert_eq!(out.len(), 5);
        assert!(!sorted_ids(&out).contains(&"bad"));
    }

    #[test]
    fn rating_filter_never_starves_the_result() {
        // Only 3 pass the floor but the target is 5: the full
        // coordinate-having set must be used instead.
        let mut pool: Vec<Candidate> = (0..3)
            .map(|i| {
                candidate(
                    &format!("good-{i}"),
                    &format!("Good {i}"),
                    Some(&format!("{i} Good St")),
                    Some(4.0),
                )
            })
            .collect();
        pool.push(candidate("low-1", "Low One", Some("1 Low St"), Some(1.0)));
        pool.push(candidate("low-2", "Low Two", Some("2 Low St"), Some(1.5)));

        let out = select_candidates(pool.clone(), &config(5));
        let expected = dedupe_by_name_address(pool);
        assert_eq!(sorted_ids(&out), sorted_ids(&expected));
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn absent_rating_is_not_disqualifying() {
        let pool = vec![
            candidate("rated", "Rated", Some("1 A St"), Some(3.0)),
            candidate("unrated", "Unrated", Some("2 B St"), None),
        ];
        let out = select_candidates(pool, &config(2));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn name_address_collision_keeps_higher_rating() {
        let lower = candidate("a", "Twin Cafe", Some("5 Twin St"), Some(3.0));
        let higher = candidate("b", "Twin Cafe", Some("5 Twin St"), Some(4.5));

        let out = dedupe_by_name_address(vec![lower, higher]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].place_id, "b");
    }

    #[test]
    fn rating_tie_keeps_the_closer_candidate() {
        let mut far = candidate("far", "Twin Cafe", Some("5 Twin St"), Some(4.0));
        far.distance_meters = 9_000.0;
        let mut near = candidate("near", "Twin Cafe", Some("5 Twin St"), Some(4.0));
        near.distance_meters = 800.0;

        let out = dedupe_by_name_address(vec![far, near]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].place_id, "near");
    }

    #[test]
    fn missing_address_is_never_coalesced() {
        let one = candidate("one", "No Address Diner", None, Some(4.0));
        let two = candidate("two", "No Address Diner", None, Some(4.0));

        let out = dedupe_by_name_address(vec![one, two]);
        assert_eq!(out.len(), 2, "place-id identity protects them");
    }

    #[test]
    fn dedup_is_idempotent() {
        let pool = vec![
            candidate("a", "Twin Cafe", Some("5 Twin St"), Some(3.0)),
            candidate("b", "Twin Cafe", Some("5 Twin St"), Some(4.5)),
            candidate("c", "Solo Bar", Some("7 Solo St"), None),
        ];
        let once = dedupe_by_name_address(pool);
        let twice = dedupe_by_name_address(once.clone());
        assert_eq!(sorted_ids(&once), sorted_ids(&twice));
    }

    #[test]
    fn select_is_idempotent() {
        let pool: Vec<Candidate> = (0..6)
            .map(|i| {
                candidate(
                    &format!("p-{i}"),
                    &format!("Place {i}"),
                    Some(&format!("{i} Place St")),
                    Some(3.5),
                )
            })
            .collect();
        let cfg = config(4);
        let once = select_candidates(pool, &cfg);
        let twice = select_candidates(once.clone(), &cfg);
        assert_eq!(sorted_ids(&once), sorted_ids(&twice));
    }

    #[test]
    fn dedup_undershoot_relaxes_the_rating_filter() {
        // Five high-rated entries collapse to one under name+address dedup;
        // the low-rated distinct venues must be recovered.
        let mut pool: Vec<Candidate> = (0..5)
            .map(|i| candidate(&format!("dup-{i}"), "Same Cafe", Some("1 Same St"), Some(4.0)))
            .collect();
        pool.push(candidate("low-1", "Low One", Some("1 Low St"), Some(1.0)));
        pool.push(candidate("low-2", "Low Two", Some("2 Low St"), Some(1.0)));

        let out = select_candidates(pool.clone(), &config(5));
        let expected = dedupe_by_name_address(pool);
        assert_eq!(sorted_ids(&out), sorted_ids(&expected));
        assert_eq!(out.len(), 3);
    }
}
