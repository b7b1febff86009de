//! PG Explorer - Filter, sort and browse PG / co-living property listings
//!
//! This library loads pages of property listings (as served by a paginated listings endpoint
//! and saved to JSON files) and keeps a filtered, sorted view of them in sync with the user's
//! selections. It supports:
//!
//! - Multi-criteria filtering: city, location, price range, gender preference, amenities,
//!   virtual tour, sharing type and minimum rating
//! - Sorting by newest, price (either direction) or rating
//! - Debounced price-range input and an active-filter count for UI badges
//! - A small filter query language (`city:pune price:5000-12000 amenity:wifi`)
//! - Fuzzy free-text search over title, address and city
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::time::Instant;
//!
//! use pg_explorer::{ExplorerConfig, ListingExplorer, build_store, parse_filter};
//!
//! let store = build_store(&[PathBuf::from("pages/")])?;
//! let mut explorer = ListingExplorer::new(ExplorerConfig::default());
//! explorer.load_page(store.into_page());
//!
//! explorer.update_filters(parse_filter("city:pune sort:price-low")?, Instant::now())?;
//! for property in explorer.results() {
//!     println!("{}", property.summary());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod explorer;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use config::{ExplorerConfig, load_config};
pub use error::FilterError;
pub use explorer::ListingExplorer;
pub use filters::{FilterState, FilterUpdate, parse_filter};
pub use models::{ListingPage, PageRequest, Property};
pub use parsers::listings::parse_listing_page;
pub use store::build_store;
pub use utils::paths::format_path_with_tilde;
