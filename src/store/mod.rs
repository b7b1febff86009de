//! Listing store loading
//!
//! # Error Handling Strategy
//!
//! - **Page-level failures**: A page file that can't be read or parsed is logged and skipped,
//!   so one broken download doesn't hide the rest of the listings.
//!
//! - **Error rate tracking**: Loading fails if more than 50% of the page files fail.
//!
//! - **Record-level failures**: Delegated to [`crate::parsers`], which skips malformed
//!   properties within a page and applies its own failure threshold.

pub mod builder;
pub mod discovery;

use crate::models::{ListingPage, Pagination, Property};

pub use builder::build_store;
pub use discovery::{MAX_PAGE_FILES, discover_page_files};

/// Listings materialized in memory, ready to hand to the explorer
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    pub properties: Vec<Property>,
    pub pagination: Option<Pagination>,
    pub pages_loaded: usize,
    pub pages_failed: usize,
    pub duplicates_dropped: usize,
}

impl ListingStore {
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn into_page(self) -> ListingPage {
        ListingPage { properties: self.properties, pagination: self.pagination }
    }
}
