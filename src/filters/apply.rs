use super::state::{FilterState, SharingSelector};
use crate::models::Property;

/// Apply the current filter state to a list of properties, keeping store order
///
/// Filter logic:
/// - Every predicate must hold (logical AND across dimensions)
/// - Unset controls (empty string, `Any`, zero rating, flag off) impose no constraint
/// - A missing attribute on the property fails the predicate that reads it
pub fn apply_filters(properties: Vec<Property>, state: &FilterState) -> Vec<Property> {
    properties.into_iter().filter(|property| matches(property, state)).collect()
}

/// Indices into `properties` of the entries that satisfy `state`, in store order
pub fn matching_indices(properties: &[Property], state: &FilterState) -> Vec<usize> {
    properties
        .iter()
        .enumerate()
        .filter(|(_, property)| matches(property, state))
        .map(|(idx, _)| idx)
        .collect()
}

/// Evaluate every predicate against a single property
pub fn matches(property: &Property, state: &FilterState) -> bool {
    match_city(property, &state.city)
        && match_location(property, &state.location)
        && match_price(property, state)
        && match_gender(property, state)
        && match_amenities(property, state)
        && match_virtual_tour(property, state.virtual_tour_only)
        && match_rating(property, state.min_rating)
}

/// City (case-insensitive substring match)
fn match_city(property: &Property, city: &str) -> bool {
    contains_ignore_case(property.city.as_deref(), city)
}

/// Address (case-insensitive substring match)
fn match_location(property: &Property, location: &str) -> bool {
    contains_ignore_case(property.address.as_deref(), location)
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    match haystack {
        Some(haystack) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

/// Price resolved for the selected sharing type must lie within the debounced range
///
/// A debounced range still at the derived bounds only requires a resolved price, so
/// listings priced under the bounds floor stay visible until the user narrows the range.
fn match_price(property: &Property, state: &FilterState) -> bool {
    let price = match state.sharing {
        SharingSelector::Any => property.min_price(),
        SharingSelector::Only(kind) => property.price_for(kind),
    };

    match price {
        Some(_) if state.debounced_price_range == state.price_bounds => true,
        Some(price) => state.debounced_price_range.contains(price),
        None => false,
    }
}

/// Property type must equal the one implied by the gender preference
fn match_gender(property: &Property, state: &FilterState) -> bool {
    match state.gender.property_type() {
        Some(required) => property.property_type == Some(required),
        None => true,
    }
}

/// Every selected amenity must be offered (subset, not any-of)
fn match_amenities(property: &Property, state: &FilterState) -> bool {
    state.amenities.is_subset(&property.amenities)
}

fn match_virtual_tour(property: &Property, virtual_tour_only: bool) -> bool {
    !virtual_tour_only || property.has_virtual_tour()
}

fn match_rating(property: &Property, min_rating: u8) -> bool {
    if min_rating == 0 {
        return true;
    }
    property.average_rating.is_some_and(|rating| rating >= f64::from(min_rating))
}
