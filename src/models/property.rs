use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Occupancy classification of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyType {
    Men,
    Women,
    Colive,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PropertyType::Men => "Men only",
            PropertyType::Women => "Women only",
            PropertyType::Colive => "Co-living",
        };
        f.write_str(label)
    }
}

/// Room sharing cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SharingKind {
    Single,
    Double,
    Triple,
    Quad,
}

impl SharingKind {
    pub const ALL: [SharingKind; 4] =
        [SharingKind::Single, SharingKind::Double, SharingKind::Triple, SharingKind::Quad];

    pub fn as_str(&self) -> &'static str {
        match self {
            SharingKind::Single => "single",
            SharingKind::Double => "double",
            SharingKind::Triple => "triple",
            SharingKind::Quad => "quad",
        }
    }
}

impl fmt::Display for SharingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing and availability for one sharing variant of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharingType {
    #[serde(rename = "type")]
    pub kind: SharingKind,
    /// Monthly price
    pub price: u32,
    #[serde(default)]
    pub available: u32,
}

/// A property listing as served by the listings endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub sharing_types: Vec<SharingType>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_amenities")]
    pub amenities: BTreeSet<String>,
    #[serde(default)]
    pub virtual_tour_url: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_rating")]
    pub average_rating: Option<f64>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    /// Cheapest monthly price across sharing types, `None` when there are none
    pub fn min_price(&self) -> Option<u32> {
        self.sharing_types.iter().map(|s| s.price).min()
    }

    /// Costliest monthly price across sharing types
    pub fn max_price(&self) -> Option<u32> {
        self.sharing_types.iter().map(|s| s.price).max()
    }

    /// Monthly price of the given sharing variant, if offered
    pub fn price_for(&self, kind: SharingKind) -> Option<u32> {
        self.sharing_types.iter().find(|s| s.kind == kind).map(|s| s.price)
    }

    pub fn has_virtual_tour(&self) -> bool {
        self.virtual_tour_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    pub fn rating_or_zero(&self) -> f64 {
        self.average_rating.unwrap_or(0.0)
    }

    /// Text used for free-text search: title, address and city
    pub fn search_text(&self) -> String {
        let mut text = self.title.clone();
        for part in [self.address.as_deref(), self.city.as_deref()].into_iter().flatten() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(part);
        }
        text
    }

    /// One-line summary (title, address, cheapest price) used for clipboard and CLI output
    pub fn summary(&self) -> String {
        let place = self.address.as_deref().or(self.city.as_deref()).unwrap_or("unknown location");
        match self.min_price() {
            Some(price) => format!("{} - {} - from {}/month", self.title, place, price),
            None => format!("{} - {}", self.title, place),
        }
    }
}
