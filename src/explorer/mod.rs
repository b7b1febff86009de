//! Stateful listing exploration: filter state, debounced price input and derived values.

pub mod bounds;
pub mod container;
pub mod debounce;

pub use bounds::{PRICE_FLOOR, distinct_locations, price_bounds};
pub use container::ListingExplorer;
pub use debounce::Debouncer;
