use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{ListingPage, Pagination, Property};
use crate::utils::validate_file_size;

/// Parse one page file as returned by the listings endpoint
///
/// Accepts `{"properties": [...], "pagination": {...}}` or a bare array of properties.
/// Malformed records are logged and skipped; the page is rejected if more than half fail.
pub fn parse_listing_page(path: &Path) -> Result<ListingPage> {
    // Open file and validate size to avoid TOCTOU race condition
    let file = File::open(path)
        .with_context(|| format!("Failed to open listing page: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse listing page as JSON: {}", path.display()))?;

    parse_listing_value(value, path)
}

/// Parse an already-decoded page document; `origin` is only used in messages
pub fn parse_listing_value(value: Value, origin: &Path) -> Result<ListingPage> {
    let (records, pagination) = match value {
        Value::Array(records) => (records, None),
        Value::Object(mut object) => {
            let records = match object.remove("properties") {
                Some(Value::Array(records)) => records,
                Some(_) => bail!("\"properties\" is not an array in {}", origin.display()),
                None => bail!("Missing \"properties\" in {}", origin.display()),
            };
            let pagination =
                object.remove("pagination").and_then(|raw| parse_pagination(raw, origin));
            (records, pagination)
        }
        _ => bail!("Expected an object or an array of properties in {}", origin.display()),
    };

    let total = records.len();
    let mut properties = Vec::with_capacity(total);
    let mut skipped_count = 0;

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Property>(record) {
            Ok(property) => properties.push(property),
            Err(e) => {
                warn!(
                    file = %origin.display(),
                    record = index,
                    error = %e,
                    "skipping malformed property"
                );
                skipped_count += 1;
            }
        }
    }

    // Check if failure rate is too high
    if total > 0 {
        let failure_rate = (skipped_count as f64) / (total as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many malformed properties in {}: {} of {} records failed ({:.1}%)",
                origin.display(),
                skipped_count,
                total,
                failure_rate * 100.0
            );
        }
    }

    debug!(
        file = %origin.display(),
        properties = properties.len(),
        skipped = skipped_count,
        "parsed listing page"
    );

    Ok(ListingPage { properties, pagination })
}

fn parse_pagination(raw: Value, origin: &Path) -> Option<Pagination> {
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value(raw) {
        Ok(pagination) => Some(pagination),
        Err(e) => {
            warn!(file = %origin.display(), error = %e, "ignoring malformed pagination");
            None
        }
    }
}
