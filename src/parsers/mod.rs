//! Parsers for listing page files
//!
//! # Error Handling Strategy
//!
//! Page files are parsed with **graceful degradation**:
//!
//! - **Individual record failures**: A property that fails to deserialize is logged with
//!   `tracing::warn!` and skipped, so one bad record doesn't discard the whole page.
//!
//! - **Catastrophic failure detection**: If more than 50% of a page's records fail, the page is
//!   rejected. A page in that state is more likely the wrong file than a slightly stale one.
//!
//! - **Lenient fields**: Ratings, timestamps and amenity tags arrive in several shapes; the
//!   deserializers in [`deserializers`] accept all of them and treat blanks as absent.
//!
//! - **Error propagation**: File-level problems (unreadable, oversized, not JSON, wrong shape)
//!   are returned as `anyhow::Result` with context naming the file.

pub mod deserializers;
pub mod listings;

pub use listings::{parse_listing_page, parse_listing_value};
