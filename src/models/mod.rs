//! Data models for PG / co-living property listings.
//!
//! - [`Property`] - A listing with its location, occupancy type, sharing prices and amenities
//! - [`SharingType`] - One pricing variant (single/double/triple/quad occupancy)
//! - [`ListingPage`] - One page of listings plus [`Pagination`] metadata
//! - [`PageRequest`] - Query parameters for fetching a page from the listings endpoint
//!
//! These models use serde for JSON deserialization with lenient deserializers for
//! loosely-typed fields (ratings, timestamps, amenity tags) in `parsers::deserializers`.

pub mod page;
pub mod property;

pub use page::{DEFAULT_PAGE_LIMIT, ListingPage, PageRequest, Pagination};
pub use property::{Property, PropertyType, SharingKind, SharingType};
