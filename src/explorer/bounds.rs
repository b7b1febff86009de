use std::collections::HashSet;

use crate::filters::PriceRange;
use crate::models::Property;

/// Lowest lower bound ever offered for the price slider
pub const PRICE_FLOOR: u32 = 500;

/// Price slider bounds derived from every sharing price in the store
///
/// `min = max(500, floor(0.8 * cheapest))`, `max = ceil(1.2 * costliest)`, considering positive
/// prices only. Returns `fallback` when the store has none. `max` never ends up below `min`.
pub fn price_bounds(store: &[Property], fallback: PriceRange) -> PriceRange {
    let prices = store
        .iter()
        .flat_map(|p| p.sharing_types.iter())
        .map(|s| s.price)
        .filter(|&price| price > 0);

    let (mut lowest, mut highest) = (u32::MAX, 0u32);
    for price in prices {
        lowest = lowest.min(price);
        highest = highest.max(price);
    }
    if highest == 0 {
        return fallback;
    }

    // Integer arithmetic in u64: floor(4x/5) and ceil(6x/5)
    let min = (u64::from(lowest) * 4 / 5).max(u64::from(PRICE_FLOOR));
    let max = (u64::from(highest) * 6).div_ceil(5);
    let min = u32::try_from(min).unwrap_or(u32::MAX);
    let max = u32::try_from(max).unwrap_or(u32::MAX);

    PriceRange { min, max: max.max(min) }
}

/// Distinct non-blank addresses in result order
pub fn distinct_locations(store: &[Property], results: &[usize]) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .iter()
        .filter_map(|&idx| store[idx].address.as_deref())
        .map(str::trim)
        .filter(|address| !address.is_empty() && seen.insert(*address))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::{SharingKind, SharingType};

    const FALLBACK: PriceRange = PriceRange { min: 500, max: 50_000 };

    fn create_test_property(id: &str, prices: &[u32], address: Option<&str>) -> Property {
        Property {
            id: id.to_string(),
            title: format!("PG {id}"),
            city: None,
            address: address.map(str::to_string),
            property_type: None,
            sharing_types: prices
                .iter()
                .map(|&price| SharingType { kind: SharingKind::Double, price, available: 1 })
                .collect(),
            amenities: BTreeSet::new(),
            virtual_tour_url: None,
            average_rating: None,
            created_at: None,
        }
    }

    #[test]
    fn test_bounds_widen_observed_prices() {
        let store = vec![
            create_test_property("1", &[9000, 12000], None),
            create_test_property("2", &[15001], None),
        ];
        // floor(0.8 * 9000) = 7200, ceil(1.2 * 15001) = 18001.2 -> 18002
        assert_eq!(price_bounds(&store, FALLBACK), PriceRange { min: 7200, max: 18002 });
    }

    #[test]
    fn test_bounds_lower_floor() {
        let store = vec![create_test_property("1", &[400, 3000], None)];
        assert_eq!(price_bounds(&store, FALLBACK), PriceRange { min: 500, max: 3600 });
    }

    #[test]
    fn test_bounds_fallback_without_positive_prices() {
        let store = vec![create_test_property("1", &[], None), create_test_property("2", &[0], None)];
        assert_eq!(price_bounds(&store, FALLBACK), FALLBACK);
        assert_eq!(price_bounds(&[], FALLBACK), FALLBACK);
    }

    #[test]
    fn test_bounds_max_raised_to_min() {
        // 1.2 * 100 = 120 is below the 500 floor
        let store = vec![create_test_property("1", &[100], None)];
        assert_eq!(price_bounds(&store, FALLBACK), PriceRange { min: 500, max: 500 });
    }

    #[test]
    fn test_bounds_do_not_overflow() {
        let store = vec![create_test_property("1", &[u32::MAX], None)];
        let bounds = price_bounds(&store, FALLBACK);
        assert_eq!(bounds.max, u32::MAX);
        assert!(bounds.min <= bounds.max);
    }

    #[test]
    fn test_distinct_locations_in_result_order() {
        let store = vec![
            create_test_property("1", &[1], Some("HSR Layout")),
            create_test_property("2", &[1], Some("Koramangala")),
            create_test_property("3", &[1], Some(" HSR Layout ")),
            create_test_property("4", &[1], Some("  ")),
            create_test_property("5", &[1], None),
        ];

        let locations = distinct_locations(&store, &[1, 0, 2, 3, 4]);
        assert_eq!(locations, vec!["Koramangala", "HSR Layout"]);
        assert!(distinct_locations(&store, &[]).is_empty());
    }
}
