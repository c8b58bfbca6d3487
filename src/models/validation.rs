//! Field-level validation and normalization helpers shared by the models

use std::str::FromStr;
use crate::utils::errors::ValidationError;

/// Drop blank entries from an image URL list, keeping the order of the rest
pub fn normalize_image_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .filter(|url| !url.as_ref().trim().is_empty())
        .map(|url| url.as_ref().to_string())
        .collect()
}

/// Reject empty or whitespace-only text
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Parse a numeric form field
pub fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ValidationError::NotANumber { field, value: value.to_string() })
}

/// Like [`parse_number`] but also rejects NaN and infinities
pub fn parse_finite(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let number: f64 = parse_number(field, value)?;
    if !number.is_finite() {
        return Err(ValidationError::NotANumber { field, value: value.to_string() });
    }
    Ok(number)
}

/// Reject NaN and infinities in a number that did not come from form text
pub fn require_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber { field, value: value.to_string() });
    }
    Ok(())
}

pub fn require_non_negative<T>(field: &'static str, value: T) -> Result<(), ValidationError>
where
    T: PartialOrd + Default,
{
    if value < T::default() {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub fn require_between<T>(field: &'static str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + ToString,
{
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

/// Check a `min_*`/`max_*` pair
pub fn require_ordered_range<T: PartialOrd>(field: &'static str, min: T, max: T) -> Result<(), ValidationError> {
    if min > max {
        return Err(ValidationError::InvertedRange { field });
    }
    Ok(())
}
