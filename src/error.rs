//! Error type for rejected filter updates and filter queries

use thiserror::Error;

/// Reasons a filter update or query is rejected
///
/// A rejected update leaves the filter state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error(
        "Unknown field: '{0}' (valid fields: city, location, price, gender, amenity, tour, sharing, rating, sort)"
    )]
    UnknownField(String),

    #[error("Invalid {field} value: '{value}' ({expected})")]
    InvalidValue { field: &'static str, value: String, expected: &'static str },

    #[error("Invalid rating: {0} (must be between 0 and 5)")]
    InvalidRating(u8),

    #[error("Invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: u32, max: u32 },

    #[error("Duplicate field: '{0}' may only appear once")]
    DuplicateField(&'static str),

    #[error("Unsupported operator: '{0}' (filters are always combined with AND)")]
    UnsupportedOperator(String),

    #[error("Malformed filter query: {0}")]
    Syntax(String),
}

impl FilterError {
    pub(crate) fn invalid(field: &'static str, value: &str, expected: &'static str) -> Self {
        FilterError::InvalidValue { field, value: value.to_string(), expected }
    }
}
