//! Filter state and partial updates.
//!
//! [`FilterState`] is the single source of truth for the current filter and sort selections.
//! It only changes through [`FilterState::apply`], which merges a [`FilterUpdate`] (every field
//! optional) into the existing state. Unset update fields keep their prior values, and fields
//! whose value doesn't change are left untouched so callers can skip needless recomputation.
//!
//! The price range exists twice: `price_range` follows UI input immediately while
//! `debounced_price_range` is the value the predicates read. Moving the input over is the
//! container's job (see `explorer::ListingExplorer`).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::models::{PropertyType, SharingKind};
use crate::parsers::deserializers::normalize_amenity;

pub const MAX_RATING: u8 = 5;

/// Inclusive monthly price range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    pub fn new(min: u32, max: u32) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Who the user is looking to live with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenderPreference {
    #[default]
    Any,
    Men,
    Women,
    #[serde(alias = "coliving")]
    CoLiving,
}

impl GenderPreference {
    /// Property type a listing must have to satisfy this preference
    pub fn property_type(&self) -> Option<PropertyType> {
        match self {
            GenderPreference::Any => None,
            GenderPreference::Men => Some(PropertyType::Men),
            GenderPreference::Women => Some(PropertyType::Women),
            GenderPreference::CoLiving => Some(PropertyType::Colive),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GenderPreference::Any => "any",
            GenderPreference::Men => "men",
            GenderPreference::Women => "women",
            GenderPreference::CoLiving => "co-living",
        }
    }
}

impl FromStr for GenderPreference {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(GenderPreference::Any),
            "men" | "male" => Ok(GenderPreference::Men),
            "women" | "female" => Ok(GenderPreference::Women),
            "coliving" | "co-living" | "colive" => Ok(GenderPreference::CoLiving),
            _ => Err(FilterError::invalid("gender", s, "any, men, women or coliving")),
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sharing-type selection: any variant, or one specific cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SharingSelector {
    #[default]
    Any,
    Only(SharingKind),
}

impl FromStr for SharingSelector {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(SharingSelector::Any),
            "single" => Ok(SharingSelector::Only(SharingKind::Single)),
            "double" => Ok(SharingSelector::Only(SharingKind::Double)),
            "triple" => Ok(SharingSelector::Only(SharingKind::Triple)),
            "quad" => Ok(SharingSelector::Only(SharingKind::Quad)),
            _ => Err(FilterError::invalid("sharing", s, "any, single, double, triple or quad")),
        }
    }
}

impl TryFrom<String> for SharingSelector {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SharingSelector> for String {
    fn from(value: SharingSelector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SharingSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharingSelector::Any => f.write_str("any"),
            SharingSelector::Only(kind) => f.write_str(kind.as_str()),
        }
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }

    /// Next key in display order, wrapping around (used by the TUI's sort toggle)
    pub fn next(&self) -> Self {
        match self {
            SortKey::Newest => SortKey::PriceLow,
            SortKey::PriceLow => SortKey::PriceHigh,
            SortKey::PriceHigh => SortKey::Rating,
            SortKey::Rating => SortKey::Newest,
        }
    }
}

impl FromStr for SortKey {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "price-low" | "price_low" => Ok(SortKey::PriceLow),
            "price-high" | "price_high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            _ => Err(FilterError::invalid("sort", s, "newest, price-low, price-high or rating")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current filter and sort selections
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub city: String,
    pub location: String,
    /// Follows UI input immediately
    pub price_range: PriceRange,
    /// Read by the price predicate
    pub debounced_price_range: PriceRange,
    /// Derived from the store; a committed range equal to these bounds imposes no constraint
    pub price_bounds: PriceRange,
    pub gender: GenderPreference,
    pub amenities: BTreeSet<String>,
    pub virtual_tour_only: bool,
    pub sharing: SharingSelector,
    pub min_rating: u8,
    pub sort_by: SortKey,
}

/// What an [`FilterState::apply`] call actually changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    /// A field read by the predicates or the comparator changed
    pub selections_changed: bool,
    /// The immediate price range changed (debounced value not yet touched)
    pub price_input_changed: bool,
}

impl Applied {
    pub fn any(&self) -> bool {
        self.selections_changed || self.price_input_changed
    }
}

impl FilterState {
    /// All-default state: no constraints, both price ranges at `bounds`
    pub fn new(bounds: PriceRange, sort_by: SortKey) -> Self {
        Self {
            city: String::new(),
            location: String::new(),
            price_range: bounds,
            debounced_price_range: bounds,
            price_bounds: bounds,
            gender: GenderPreference::Any,
            amenities: BTreeSet::new(),
            virtual_tour_only: false,
            sharing: SharingSelector::Any,
            min_rating: 0,
            sort_by,
        }
    }

    /// Merge `update` into the state
    ///
    /// The update is validated as a whole first; on error nothing is written.
    pub fn apply(&mut self, update: &FilterUpdate) -> Result<Applied, FilterError> {
        update.validate()?;

        let mut applied = Applied::default();
        let mut changed = false;

        if let Some(ref city) = update.city {
            changed |= assign(&mut self.city, city.trim().to_string());
        }
        if let Some(ref location) = update.location {
            changed |= assign(&mut self.location, location.trim().to_string());
        }
        if let Some(gender) = update.gender {
            changed |= assign(&mut self.gender, gender);
        }
        if let Some(ref amenities) = update.amenities {
            let normalized: BTreeSet<String> = amenities
                .iter()
                .map(|a| normalize_amenity(a))
                .filter(|a| !a.is_empty())
                .collect();
            changed |= assign(&mut self.amenities, normalized);
        }
        if let Some(flag) = update.virtual_tour_only {
            changed |= assign(&mut self.virtual_tour_only, flag);
        }
        if let Some(sharing) = update.sharing {
            changed |= assign(&mut self.sharing, sharing);
        }
        if let Some(rating) = update.min_rating {
            changed |= assign(&mut self.min_rating, rating);
        }
        if let Some(sort_by) = update.sort_by {
            changed |= assign(&mut self.sort_by, sort_by);
        }
        applied.selections_changed = changed;

        if let Some(range) = update.price_range {
            applied.price_input_changed = assign(&mut self.price_range, range);
        }

        Ok(applied)
    }

    /// Move a settled price range into the value the predicates read
    pub fn commit_price_range(&mut self, range: PriceRange) -> bool {
        self.price_range = range;
        assign(&mut self.debounced_price_range, range)
    }

    /// Replace the derived bounds and reset both price ranges to them
    pub fn reset_price_bounds(&mut self, bounds: PriceRange) -> bool {
        self.price_bounds = bounds;
        self.commit_price_range(bounds)
    }

    /// Number of filter dimensions deviating from their defaults
    ///
    /// The price range counts as active when the immediate range differs from `bounds` on
    /// either end. Sort order never counts.
    pub fn active_count(&self, bounds: PriceRange) -> usize {
        [
            !self.city.trim().is_empty(),
            !self.location.trim().is_empty(),
            self.gender != GenderPreference::Any,
            !self.amenities.is_empty(),
            self.virtual_tour_only,
            self.sharing != SharingSelector::Any,
            self.min_rating > 0,
            self.price_range != bounds,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Partial update of [`FilterState`]; `None` fields are left as they are
///
/// Deserializing rejects unknown fields so misspelled keys never get silently dropped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterUpdate {
    pub city: Option<String>,
    pub location: Option<String>,
    pub price_range: Option<PriceRange>,
    pub gender: Option<GenderPreference>,
    pub amenities: Option<BTreeSet<String>>,
    pub virtual_tour_only: Option<bool>,
    pub sharing: Option<SharingSelector>,
    pub min_rating: Option<u8>,
    pub sort_by: Option<SortKey>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn price_range(mut self, min: u32, max: u32) -> Self {
        self.price_range = Some(PriceRange { min, max });
        self
    }

    pub fn gender(mut self, gender: GenderPreference) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = Some(amenities.into_iter().map(Into::into).collect());
        self
    }

    pub fn virtual_tour_only(mut self, flag: bool) -> Self {
        self.virtual_tour_only = Some(flag);
        self
    }

    pub fn sharing(mut self, sharing: SharingSelector) -> Self {
        self.sharing = Some(sharing);
        self
    }

    pub fn min_rating(mut self, rating: u8) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn sort_by(mut self, sort_by: SortKey) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let Some(rating) = self.min_rating
            && rating > MAX_RATING
        {
            return Err(FilterError::InvalidRating(rating));
        }
        if let Some(range) = self.price_range {
            PriceRange::new(range.min, range.max)?;
        }
        Ok(())
    }
}
