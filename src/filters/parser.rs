//! Filter query parser.
//!
//! Parses user-provided filter expressions into a [`FilterUpdate`]. Every term sets one field
//! of the update; terms are always combined with AND, mirroring how the predicates compose.
//!
//! # Syntax
//!
//! ```text
//! query := term (AND? term)*
//! term  := field:value | field:"quoted value"
//! field := city | location | price | gender | amenity | tour | sharing | rating | sort
//! ```
//!
//! # Supported Fields
//!
//! - `city:name` - City substring (case-insensitive)
//! - `location:text` - Address substring (alias `loc`, `area`)
//! - `price:MIN-MAX` - Monthly price range, inclusive
//! - `gender:any|men|women|coliving`
//! - `amenity:wifi,ac` - Required amenities; repeatable, values accumulate (alias `amenities`)
//! - `tour:yes|no` - Only listings with a virtual tour
//! - `sharing:any|single|double|triple|quad`
//! - `rating:N` - Minimum average rating, 0 to 5
//! - `sort:newest|price-low|price-high|rating`
//!
//! # Examples
//!
//! ```rust
//! # use pg_explorer::filters::parser::parse_filter;
//! let update = parse_filter("city:pune gender:women").unwrap();
//! assert_eq!(update.city.as_deref(), Some("pune"));
//!
//! let update = parse_filter("location:\"MG Road\" AND amenity:wifi amenity:ac").unwrap();
//! assert_eq!(update.amenities.unwrap().len(), 2);
//!
//! assert!(parse_filter("city:pune OR city:mumbai").is_err());
//! ```

use std::collections::BTreeSet;

use super::state::{FilterUpdate, PriceRange, SortKey};
use crate::error::FilterError;

/// Token types produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// field:value or field:"quoted value"
    FieldValue { field: String, value: String },
    /// AND keyword
    And,
    /// OR keyword (rejected by the parser)
    Or,
}

/// Filter fields understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    City,
    Location,
    Price,
    Gender,
    Amenity,
    Tour,
    Sharing,
    Rating,
    Sort,
}

impl Field {
    fn name(&self) -> &'static str {
        match self {
            Field::City => "city",
            Field::Location => "location",
            Field::Price => "price",
            Field::Gender => "gender",
            Field::Amenity => "amenity",
            Field::Tour => "tour",
            Field::Sharing => "sharing",
            Field::Rating => "rating",
            Field::Sort => "sort",
        }
    }
}

/// Tokenize filter input string into tokens
fn tokenize(input: &str) -> Result<Vec<Token>, FilterError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        match word.to_uppercase().as_str() {
            "AND" => tokens.push(Token::And),
            "OR" => tokens.push(Token::Or),
            _ => {
                let Some(colon_pos) = word.find(':') else {
                    return Err(FilterError::Syntax(format!(
                        "invalid token '{}' (expected field:value)",
                        word
                    )));
                };

                let field = word[..colon_pos].to_string();
                let mut value = word[colon_pos + 1..].to_string();

                if value.starts_with('"') {
                    value = read_quoted_value(&mut chars, &value)?;
                }

                if field.is_empty() || value.trim().is_empty() {
                    return Err(FilterError::Syntax(format!(
                        "invalid field:value format '{}'",
                        word
                    )));
                }

                tokens.push(Token::FieldValue { field, value });
            }
        }
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value; `initial` is the part of the word after the colon, opening quote included
fn read_quoted_value(
    chars: &mut std::iter::Peekable<std::str::Chars>,
    initial: &str,
) -> Result<String, FilterError> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        let trailing = &value[quote_pos + 1..];
        if !trailing.is_empty() {
            return Err(trailing_after_quote(trailing));
        }
        value.truncate(quote_pos);
        return Ok(value);
    }

    while let Some(ch) = chars.next() {
        if ch == '"' {
            let trailing = read_word(chars);
            if !trailing.is_empty() {
                return Err(trailing_after_quote(&trailing));
            }
            return Ok(value);
        }
        value.push(ch);
    }

    Err(FilterError::Syntax("unterminated quoted string".to_string()))
}

fn trailing_after_quote(trailing: &str) -> FilterError {
    FilterError::Syntax(format!("unexpected '{}' after closing quote", trailing))
}

fn parse_field(field: &str) -> Result<Field, FilterError> {
    match field.to_lowercase().as_str() {
        "city" => Ok(Field::City),
        "location" | "loc" | "area" => Ok(Field::Location),
        "price" => Ok(Field::Price),
        "gender" => Ok(Field::Gender),
        "amenity" | "amenities" => Ok(Field::Amenity),
        "tour" => Ok(Field::Tour),
        "sharing" => Ok(Field::Sharing),
        "rating" => Ok(Field::Rating),
        "sort" => Ok(Field::Sort),
        _ => Err(FilterError::UnknownField(field.to_string())),
    }
}

/// Parse filter string into a partial state update
///
/// Examples:
/// - "city:pune" → sets city only
/// - "price:5000-12000 sharing:double" → price range and sharing type
/// - "amenity:wifi amenity:ac" → both amenities required
/// - "location:\"MG Road\"" → quoted value containing a space
pub fn parse_filter(input: &str) -> Result<FilterUpdate, FilterError> {
    let mut update = FilterUpdate::new();
    if input.trim().is_empty() {
        return Ok(update);
    }

    let tokens = tokenize(input)?;
    let mut expecting_term = true;

    for token in tokens {
        match token {
            Token::FieldValue { field, value } => {
                let field = parse_field(&field)?;
                apply_term(&mut update, field, value.trim())?;
                expecting_term = false;
            }
            Token::And => {
                if expecting_term {
                    return Err(FilterError::Syntax(
                        "unexpected AND (expected field:value)".to_string(),
                    ));
                }
                expecting_term = true;
            }
            Token::Or => return Err(FilterError::UnsupportedOperator("OR".to_string())),
        }
    }

    if expecting_term {
        return Err(FilterError::Syntax("query ended with AND (expected field:value)".to_string()));
    }

    update.validate()?;
    Ok(update)
}

/// Set `field` on the update, rejecting a second occurrence of single-valued fields
fn apply_term(update: &mut FilterUpdate, field: Field, value: &str) -> Result<(), FilterError> {
    fn set_once<T>(slot: &mut Option<T>, field: Field, value: T) -> Result<(), FilterError> {
        if slot.is_some() {
            return Err(FilterError::DuplicateField(field.name()));
        }
        *slot = Some(value);
        Ok(())
    }

    match field {
        Field::City => set_once(&mut update.city, field, value.to_string()),
        Field::Location => set_once(&mut update.location, field, value.to_string()),
        Field::Price => set_once(&mut update.price_range, field, parse_price_range(value)?),
        Field::Gender => set_once(&mut update.gender, field, value.parse()?),
        Field::Tour => set_once(&mut update.virtual_tour_only, field, parse_flag(value)?),
        Field::Sharing => set_once(&mut update.sharing, field, value.parse()?),
        Field::Rating => set_once(&mut update.min_rating, field, parse_rating(value)?),
        Field::Sort => set_once(&mut update.sort_by, field, value.parse::<SortKey>()?),
        Field::Amenity => {
            let amenities = update.amenities.get_or_insert_with(BTreeSet::new);
            for tag in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                amenities.insert(tag.to_string());
            }
            Ok(())
        }
    }
}

/// Parse `MIN-MAX` into a validated range
fn parse_price_range(value: &str) -> Result<PriceRange, FilterError> {
    let invalid = || FilterError::invalid("price", value, "expected MIN-MAX, e.g. 5000-12000");

    let (min, max) = value.split_once('-').ok_or_else(invalid)?;
    let min = min.trim().parse::<u32>().map_err(|_| invalid())?;
    let max = max.trim().parse::<u32>().map_err(|_| invalid())?;
    PriceRange::new(min, max)
}

fn parse_flag(value: &str) -> Result<bool, FilterError> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Ok(true),
        "no" | "false" | "off" | "0" => Ok(false),
        _ => Err(FilterError::invalid("tour", value, "yes or no")),
    }
}

fn parse_rating(value: &str) -> Result<u8, FilterError> {
    value.parse::<u8>().map_err(|_| FilterError::invalid("rating", value, "a whole number 0-5"))
}
