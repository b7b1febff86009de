//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a temp directory of listing page files
pub struct PageDirBuilder {
    temp_dir: TempDir,
}

impl PageDirBuilder {
    /// Create a new builder with an empty directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a page file with raw content
    pub fn with_raw_page(self, name: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create page dir");
        }
        fs::write(path, content).expect("Failed to write page file");
        self
    }

    /// Write a `{"properties": [...], "pagination": {...}}` page file
    pub fn with_page(
        self,
        name: &str,
        properties: &[PropertyBuilder],
        page: u32,
        total: u64,
    ) -> Self {
        let limit = properties.len().max(1) as u64;
        let document = json!({
            "properties": properties.iter().map(PropertyBuilder::to_value).collect::<Vec<_>>(),
            "pagination": {
                "page": page,
                "limit": limit,
                "total": total,
                "totalPages": total.div_ceil(limit),
            },
        });
        self.with_raw_page(name, &document.to_string())
    }

    /// Write a bare JSON array of properties
    pub fn with_array_page(self, name: &str, properties: &[PropertyBuilder]) -> Self {
        let document =
            Value::Array(properties.iter().map(PropertyBuilder::to_value).collect::<Vec<_>>());
        self.with_raw_page(name, &document.to_string())
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for PageDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for property records in the endpoint's JSON shape
#[derive(Clone)]
pub struct PropertyBuilder {
    id: String,
    title: String,
    city: Option<String>,
    address: Option<String>,
    property_type: Option<String>,
    sharing_types: Vec<(String, u32)>,
    amenities: Vec<String>,
    virtual_tour_url: Option<String>,
    average_rating: Option<f64>,
    created_at: Option<String>,
}

impl PropertyBuilder {
    /// Create a property with an id and default values
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: format!("PG {}", id),
            city: None,
            address: None,
            property_type: None,
            sharing_types: Vec::new(),
            amenities: Vec::new(),
            virtual_tour_url: None,
            average_rating: None,
            created_at: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.city = Some(city.to_string());
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// `MEN`, `WOMEN` or `COLIVE`
    pub fn property_type(mut self, property_type: &str) -> Self {
        self.property_type = Some(property_type.to_string());
        self
    }

    /// `SINGLE`, `DOUBLE`, `TRIPLE` or `QUAD`
    pub fn sharing(mut self, kind: &str, price: u32) -> Self {
        self.sharing_types.push((kind.to_string(), price));
        self
    }

    pub fn amenity(mut self, amenity: &str) -> Self {
        self.amenities.push(amenity.to_string());
        self
    }

    pub fn tour(mut self, url: &str) -> Self {
        self.virtual_tour_url = Some(url.to_string());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.average_rating = Some(rating);
        self
    }

    /// RFC3339 creation time
    pub fn created_at(mut self, timestamp: &str) -> Self {
        self.created_at = Some(timestamp.to_string());
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "city": self.city,
            "address": self.address,
            "type": self.property_type,
            "sharingTypes": self
                .sharing_types
                .iter()
                .map(|(kind, price)| json!({"type": kind, "price": price, "available": 1}))
                .collect::<Vec<_>>(),
            "amenities": self.amenities,
            "virtualTourUrl": self.virtual_tour_url,
            "averageRating": self.average_rating,
            "createdAt": self.created_at,
        })
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// Ids of the given properties, in order
pub fn ids<'a>(properties: impl IntoIterator<Item = &'a pg_explorer::Property>) -> Vec<String> {
    properties.into_iter().map(|p| p.id.clone()).collect()
}
