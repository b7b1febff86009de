pub mod apply;
pub mod parser;
pub mod search;
pub mod sort;
pub mod state;

pub use apply::{apply_filters, matches, matching_indices};
pub use parser::parse_filter;
pub use search::{TextSearch, fuzzy_retain};
pub use sort::{compare, sort_indices, sort_properties};
pub use state::{
    Applied, FilterState, FilterUpdate, GenderPreference, PriceRange, SharingSelector, SortKey,
};
