//! Result ordering for filtered listings.
//!
//! Every ordering is applied with a stable sort, so entries with equal keys keep the order
//! they had in the store. Entries missing the sort attribute always go last:
//! no sharing types under either price order, no creation time under `Newest`.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::state::SortKey;
use crate::models::Property;

/// Compare two properties under `key`
pub fn compare(a: &Property, b: &Property, key: SortKey) -> Ordering {
    match key {
        SortKey::PriceLow => missing_last(a.min_price(), b.min_price(), |x, y| x.cmp(&y)),
        SortKey::PriceHigh => missing_last(a.min_price(), b.min_price(), |x, y| y.cmp(&x)),
        SortKey::Rating => b.rating_or_zero().total_cmp(&a.rating_or_zero()),
        SortKey::Newest => missing_last(a.created_at, b.created_at, |x, y| y.cmp(&x)),
    }
}

/// Sort in place (stable) by `key`
pub fn sort_properties<P: Borrow<Property>>(items: &mut [P], key: SortKey) {
    items.sort_by(|a, b| compare(a.borrow(), b.borrow(), key));
}

/// Sort indices into `store` (stable) by `key`
pub fn sort_indices(indices: &mut [usize], store: &[Property], key: SortKey) {
    indices.sort_by(|&a, &b| compare(&store[a], &store[b], key));
}

fn missing_last<T>(a: Option<T>, b: Option<T>, present: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => present(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
