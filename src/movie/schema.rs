//! Movie schema: one rule per field, consumed in two presence modes.
//!
//! `validate_full` and `validate_partial` share every `check_*` rule below.
//! The only difference is what happens when a key is absent: full mode
//! records a `required` issue (except for `rate`, which defaults), partial
//! mode leaves the field out of the patch.

use serde_json::{Map, Value};
use url::Url;

use super::error::{IssueCode, ValidationErrors, ValidationIssue};
use super::genre::Genre;
use super::{MoviePatch, NewMovie};

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2025;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;
pub const DEFAULT_RATE: f64 = 5.0;

/// Fields that must be present in full mode.
const REQUIRED: [&str; 6] = ["title", "year", "director", "duration", "poster", "genre"];

/// Validate a candidate for creation. Unknown keys (including `id`) are dropped.
pub fn validate_full(input: &Value) -> Result<NewMovie, ValidationErrors> {
    let object = as_object(input)?;
    let mut errors = ValidationErrors::new();

    for field in REQUIRED {
        if !object.contains_key(field) {
            errors.push(
                ValidationIssue::new(field, IssueCode::Required, "Required").received("undefined"),
            );
        }
    }

    let patch = check_fields(object, &mut errors);

    match patch {
        MoviePatch {
            title: Some(title),
            year: Some(year),
            director: Some(director),
            duration: Some(duration),
            poster: Some(poster),
            genre: Some(genre),
            rate,
        } if errors.is_empty() => Ok(NewMovie {
            title,
            year,
            director,
            duration,
            poster,
            genre,
            rate: rate.unwrap_or(DEFAULT_RATE),
        }),
        _ => Err(errors),
    }
}

/// Validate a partial update. Absent fields stay absent; no defaults are injected.
pub fn validate_partial(input: &Value) -> Result<MoviePatch, ValidationErrors> {
    let object = as_object(input)?;
    let mut errors = ValidationErrors::new();
    let patch = check_fields(object, &mut errors);
    errors.into_result(patch)
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    input.as_object().ok_or_else(|| {
        ValidationIssue::root(
            IssueCode::InvalidType,
            format!("Expected object, received {}", kind(input)),
        )
        .received(kind(input))
        .into()
    })
}

/// Run each present field through its rule.
fn check_fields(object: &Map<String, Value>, errors: &mut ValidationErrors) -> MoviePatch {
    MoviePatch {
        title: field(object, "title", errors, check_title),
        year: field(object, "year", errors, check_year),
        director: field(object, "director", errors, check_director),
        duration: field(object, "duration", errors, check_duration),
        poster: field(object, "poster", errors, check_poster),
        genre: field(object, "genre", errors, check_genre),
        rate: field(object, "rate", errors, check_rate),
    }
}

fn field<T>(
    object: &Map<String, Value>,
    name: &'static str,
    errors: &mut ValidationErrors,
    rule: fn(&'static str, &Value, &mut ValidationErrors) -> Option<T>,
) -> Option<T> {
    object.get(name).and_then(|value| rule(name, value, errors))
}

fn check_title(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    let Some(title) = value.as_str() else {
        errors.push(
            ValidationIssue::new(field, IssueCode::InvalidType, "Title must be a string")
                .received(kind(value)),
        );
        return None;
    };
    if title.is_empty() {
        errors.push(
            ValidationIssue::new(field, IssueCode::TooSmall, "Title must not be empty")
                .received("string"),
        );
        return None;
    }
    Some(title.to_string())
}

fn check_year(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<i32> {
    let year = integer(field, value, errors)?;
    in_range(field, year, MIN_YEAR, MAX_YEAR, errors)?;
    i32::try_from(year).ok()
}

fn check_director(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    string(field, value, errors)
}

fn check_duration(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<u32> {
    let duration = integer(field, value, errors)?;
    if duration <= 0 {
        errors.push(
            ValidationIssue::new(field, IssueCode::TooSmall, "Number must be greater than 0")
                .received("number"),
        );
        return None;
    }
    in_range(field, duration, 1, i64::from(u32::MAX), errors)?;
    u32::try_from(duration).ok()
}

fn check_poster(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    let poster = string(field, value, errors)?;
    if Url::parse(&poster).is_err() {
        errors.push(
            ValidationIssue::new(field, IssueCode::InvalidUrl, "Poster must be a valid URL")
                .received("string"),
        );
        return None;
    }
    Some(poster)
}

fn check_genre(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<Vec<Genre>> {
    let Some(items) = value.as_array() else {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::InvalidType,
                "Movie genre must be an array of enum Genre",
            )
            .received(kind(value)),
        );
        return None;
    };

    let mut genres = Vec::with_capacity(items.len());
    let mut valid = true;
    for (index, item) in items.iter().enumerate() {
        match item.as_str().and_then(Genre::from_name) {
            Some(genre) => genres.push(genre),
            None => {
                valid = false;
                errors.push(
                    ValidationIssue::new(field, IssueCode::InvalidEnumValue, enum_message(item))
                        .at(index)
                        .received(kind(item)),
                );
            }
        }
    }
    valid.then_some(genres)
}

fn check_rate(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<f64> {
    let Some(rate) = value.as_f64() else {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::InvalidType,
                format!("Expected number, received {}", kind(value)),
            )
            .received(kind(value)),
        );
        return None;
    };
    if rate < MIN_RATE {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::TooSmall,
                format!("Number must be greater than or equal to {}", MIN_RATE),
            )
            .received("number"),
        );
        return None;
    }
    if rate > MAX_RATE {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::TooBig,
                format!("Number must be less than or equal to {}", MAX_RATE),
            )
            .received("number"),
        );
        return None;
    }
    Some(rate)
}

fn string(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<String> {
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            errors.push(
                ValidationIssue::new(
                    field,
                    IssueCode::InvalidType,
                    format!("Expected string, received {}", kind(value)),
                )
                .received(kind(value)),
            );
            None
        }
    }
}

/// Integral JSON numbers, including ones written as `2021.0`.
fn integer(field: &'static str, value: &Value, errors: &mut ValidationErrors) -> Option<i64> {
    let Some(n) = value.as_f64() else {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::InvalidType,
                format!("Expected number, received {}", kind(value)),
            )
            .received(kind(value)),
        );
        return None;
    };
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    if n.fract() != 0.0 {
        errors.push(
            ValidationIssue::new(field, IssueCode::InvalidType, "Expected integer, received float")
                .received("float"),
        );
        return None;
    }
    // Saturating; anything this large fails the range check anyway.
    Some(n as i64)
}

fn in_range(
    field: &'static str,
    n: i64,
    min: i64,
    max: i64,
    errors: &mut ValidationErrors,
) -> Option<()> {
    if n < min {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::TooSmall,
                format!("Number must be greater than or equal to {}", min),
            )
            .received("number"),
        );
        return None;
    }
    if n > max {
        errors.push(
            ValidationIssue::new(
                field,
                IssueCode::TooBig,
                format!("Number must be less than or equal to {}", max),
            )
            .received("number"),
        );
        return None;
    }
    Some(())
}

fn enum_message(item: &Value) -> String {
    let expected = Genre::ALL
        .iter()
        .map(|g| format!("'{}'", g))
        .collect::<Vec<_>>()
        .join(" | ");
    match item.as_str() {
        Some(s) => format!("Invalid enum value. Expected {}, received '{}'", expected, s),
        None => format!("Expected {}, received {}", expected, kind(item)),
    }
}

/// JSON type category of a value, as reported in `received`.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
