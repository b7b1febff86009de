use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Timestamp that accepts integers (ms since epoch), RFC3339 strings or null
///
/// Anything else is logged and read as absent; a bad timestamp never drops the record.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => return Ok(None),
        // Unix timestamp in milliseconds
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(s) => s.trim().parse::<DateTime<Utc>>().ok(),
        _ => None,
    };

    if parsed.is_none() {
        warn!(value = %value, "ignoring unreadable createdAt");
    }
    Ok(parsed)
}

/// Average rating as a number, a numeric string, or null
///
/// Unparseable, non-finite or out of 0..=5 ratings are logged and read as absent.
pub fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rating = match &value {
        Value::Null => return Ok(None),
        Value::String(s) if s.trim().is_empty() => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match rating {
        Some(rating) if rating.is_finite() && (0.0..=5.0).contains(&rating) => Ok(Some(rating)),
        _ => {
            warn!(value = %value, "ignoring unreadable averageRating");
            Ok(None)
        }
    }
}

/// Amenity tags as plain strings or `{"type": "..."}` objects, normalized to upper case
pub fn deserialize_amenities<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Null => return Ok(BTreeSet::new()),
        Value::Array(items) => items,
        _ => return Err(Error::custom("amenities must be a list")),
    };

    let mut tags = BTreeSet::new();
    for item in items {
        let tag = match item {
            Value::String(s) => s,
            Value::Object(mut map) => match map.remove("type") {
                Some(Value::String(s)) => s,
                _ => return Err(Error::custom("amenity object missing string 'type'")),
            },
            _ => return Err(Error::custom("amenity must be a string or object")),
        };
        let tag = normalize_amenity(&tag);
        if !tag.is_empty() {
            tags.insert(tag);
        }
    }
    Ok(tags)
}

/// Canonical form of an amenity tag (`"wi-fi "` → `"WI_FI"`)
pub fn normalize_amenity(tag: &str) -> String {
    tag.trim()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c.to_ascii_uppercase() })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use crate::models::Property;

    use super::normalize_amenity;

    #[test]
    fn test_created_at_integer_millis() {
        let json = r#"{"id": "a", "createdAt": 1762076480016}"#;
        let p: Property = serde_json::from_str(json).unwrap();
        let expected = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(p.created_at, Some(expected));
    }

    #[test]
    fn test_created_at_rfc3339() {
        let json = r#"{"id": "a", "createdAt": "2025-11-02T09:41:20.016Z"}"#;
        let p: Property = serde_json::from_str(json).unwrap();
        assert!(p.created_at.is_some());
    }

    #[test]
    fn test_created_at_null() {
        let json = r#"{"id": "a", "createdAt": null}"#;
        let p: Property = serde_json::from_str(json).unwrap();
        assert_eq!(p.created_at, None);
    }

    #[test]
    fn test_created_at_unreadable_becomes_none() {
        for raw in [r#"true"#, r#""yesterday""#, r#"1.5"#, r#"[2025]"#] {
            let json = format!(r#"{{"id": "a", "createdAt": {}}}"#, raw);
            let p: Property = serde_json::from_str(&json).unwrap();
            assert_eq!(p.created_at, None, "createdAt {}", raw);
        }
    }

    #[test]
    fn test_rating_string_and_null() {
        let p: Property = serde_json::from_str(r#"{"id": "a", "averageRating": "4.2"}"#).unwrap();
        assert_eq!(p.average_rating, Some(4.2));

        let p: Property = serde_json::from_str(r#"{"id": "a", "averageRating": null}"#).unwrap();
        assert_eq!(p.average_rating, None);

        let p: Property = serde_json::from_str(r#"{"id": "a", "averageRating": ""}"#).unwrap();
        assert_eq!(p.average_rating, None);
    }

    #[test]
    fn test_rating_unreadable_becomes_none() {
        for raw in [r#"7"#, r#"-1"#, r#""n/a""#, r#""NaN""#, r#"{"avg": 4}"#] {
            let json = format!(r#"{{"id": "a", "averageRating": {}}}"#, raw);
            let p: Property = serde_json::from_str(&json).unwrap();
            assert_eq!(p.average_rating, None, "averageRating {}", raw);
        }
    }

    #[test]
    fn test_amenities_mixed_forms() {
        let json = r#"{"id": "a", "amenities": ["wifi", {"type": "Power Backup"}, "  "]}"#;
        let p: Property = serde_json::from_str(json).unwrap();
        assert_eq!(p.amenities.len(), 2);
        assert!(p.amenities.contains("WIFI"));
        assert!(p.amenities.contains("POWER_BACKUP"));
    }

    #[test]
    fn test_amenities_invalid_shape() {
        let json = r#"{"id": "a", "amenities": "wifi"}"#;
        assert!(serde_json::from_str::<Property>(json).is_err());
    }

    #[test]
    fn test_normalize_amenity() {
        assert_eq!(normalize_amenity("wi-fi "), "WI_FI");
        assert_eq!(normalize_amenity("AC"), "AC");
        assert_eq!(normalize_amenity("hot water"), "HOT_WATER");
    }
}
