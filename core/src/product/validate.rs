// core/src/product/validate.rs

//! Field-level type and range checks.
//!
//! Each field has three layers: `validate_*` checks a typed value's range, `parse_*`
//! checks the JSON type and then the range, and `Product::check_*` parses and assigns.
//! The checkers only touch their own field, so partial updates can reuse them without
//! re-validating the whole record.

use crate::error::{CatalogError, CatalogResult};
use crate::product::model::{Product, MAX_DESCRIPTION_LENGTH, MAX_PRICE, MAX_RATE, MIN_PRICE, MIN_RATE};
use serde_json::Value;

/// Short name of a JSON value's type, used in `InvalidType` errors.
pub fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(n) if n.is_f64() => "float",
    Value::Number(_) => "integer",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn invalid_type(field: &'static str, expected: &'static str, value: &Value) -> CatalogError {
  CatalogError::InvalidType {
    field,
    expected,
    found: json_type_name(value),
  }
}

// --- Range checks on typed values ---

pub fn validate_name(name: &str) -> CatalogResult<()> {
  if name.is_empty() {
    return Err(CatalogError::out_of_range("name", "empty string"));
  }
  Ok(())
}

pub fn validate_description(description: &str) -> CatalogResult<()> {
  let length = description.chars().count();
  if length > MAX_DESCRIPTION_LENGTH {
    return Err(CatalogError::out_of_range(
      "description",
      format!("{} characters (max {})", length, MAX_DESCRIPTION_LENGTH),
    ));
  }
  Ok(())
}

pub fn validate_price(price: f64) -> CatalogResult<()> {
  // NaN fails both comparisons.
  if price >= MIN_PRICE && price <= MAX_PRICE {
    Ok(())
  } else {
    Err(CatalogError::out_of_range("price", price))
  }
}

/// Stored ratings may be zero; submitted observations may not (see `rating::RatingObservation`).
pub fn validate_rating(rating: f64) -> CatalogResult<()> {
  if rating >= MIN_RATE && rating <= MAX_RATE {
    Ok(())
  } else {
    Err(CatalogError::out_of_range("rating", rating))
  }
}

pub fn validate_cumulative_ratings(cumulative: f64) -> CatalogResult<()> {
  if cumulative >= 0.0 && cumulative.is_finite() {
    Ok(())
  } else {
    Err(CatalogError::out_of_range("cumulative_ratings", cumulative))
  }
}

pub fn validate_no_of_users_rated(count: i64) -> CatalogResult<()> {
  if count < 0 {
    return Err(CatalogError::out_of_range("no_of_users_rated", count));
  }
  Ok(())
}

/// Relative tolerance when comparing a stored mean with `cumulative_ratings / no_of_users_rated`.
pub const MEAN_TOLERANCE: f64 = 1e-9;

/// Cross-field check of the rating state, run after each field passed its own range check.
///
/// The three fields are absent together (never rated) or present together. With a positive
/// count, `rating` must be the mean of the accumulator.
pub fn validate_rating_state(rating: Option<f64>, cumulative: Option<f64>, count: Option<i64>) -> CatalogResult<()> {
  match (rating, cumulative, count) {
    (None, None, None) => Ok(()),
    (Some(rating), Some(cumulative), Some(count)) => {
      if count == 0 {
        return Ok(());
      }
      let mean = cumulative / count as f64;
      if (rating - mean).abs() <= MEAN_TOLERANCE * mean.abs().max(1.0) {
        Ok(())
      } else {
        Err(CatalogError::out_of_range(
          "rating",
          format!("{} does not match {} / {}", rating, cumulative, count),
        ))
      }
    }
    (rating, cumulative, _) => {
      let absent = if rating.is_none() {
        "rating"
      } else if cumulative.is_none() {
        "cumulative_ratings"
      } else {
        "no_of_users_rated"
      };
      Err(CatalogError::out_of_range(
        absent,
        "absent while other rating fields are set",
      ))
    }
  }
}

// --- JSON parsing: type first, then range ---

fn parse_string(field: &'static str, value: &Value) -> CatalogResult<String> {
  value
    .as_str()
    .map(str::to_owned)
    .ok_or_else(|| invalid_type(field, "string", value))
}

pub fn parse_name(value: &Value) -> CatalogResult<String> {
  let name = parse_string("name", value)?;
  validate_name(&name)?;
  Ok(name)
}

pub fn parse_description(value: &Value) -> CatalogResult<String> {
  let description = parse_string("description", value)?;
  validate_description(&description)?;
  Ok(description)
}

pub fn parse_category(value: &Value) -> CatalogResult<String> {
  parse_string("category", value)
}

/// Only JSON floats are accepted: `20.0` passes, `20` does not.
pub fn parse_price(value: &Value) -> CatalogResult<f64> {
  let price = value
    .as_f64()
    .filter(|_| value.is_f64())
    .ok_or_else(|| invalid_type("price", "float", value))?;
  validate_price(price)?;
  Ok(price)
}

/// No truthy coercion: `"true"` and `1` are both rejected.
pub fn parse_available(value: &Value) -> CatalogResult<bool> {
  value.as_bool().ok_or_else(|| invalid_type("available", "boolean", value))
}

/// `null` means "not yet rated".
pub fn parse_rating(value: &Value) -> CatalogResult<Option<f64>> {
  if value.is_null() {
    return Ok(None);
  }
  let rating = value
    .as_f64()
    .filter(|_| value.is_f64())
    .ok_or_else(|| invalid_type("rating", "float", value))?;
  validate_rating(rating)?;
  Ok(Some(rating))
}

/// Any JSON number is accepted for the accumulator.
pub fn parse_cumulative_ratings(value: &Value) -> CatalogResult<Option<f64>> {
  if value.is_null() {
    return Ok(None);
  }
  let cumulative = value
    .as_f64()
    .ok_or_else(|| invalid_type("cumulative_ratings", "number", value))?;
  validate_cumulative_ratings(cumulative)?;
  Ok(Some(cumulative))
}

pub fn parse_no_of_users_rated(value: &Value) -> CatalogResult<Option<i64>> {
  if value.is_null() {
    return Ok(None);
  }
  if let Some(count) = value.as_i64() {
    validate_no_of_users_rated(count)?;
    return Ok(Some(count));
  }
  // Unsigned integers beyond i64::MAX are integers, just too large to count.
  if let Some(count) = value.as_u64() {
    return Err(CatalogError::out_of_range("no_of_users_rated", count));
  }
  Err(invalid_type("no_of_users_rated", "integer", value))
}

// --- Per-field setters ---

impl Product {
  pub fn check_price(&mut self, value: &Value) -> CatalogResult<()> {
    self.price = parse_price(value)?;
    Ok(())
  }

  pub fn check_available(&mut self, value: &Value) -> CatalogResult<()> {
    self.available = parse_available(value)?;
    Ok(())
  }

  pub fn check_rating(&mut self, value: &Value) -> CatalogResult<()> {
    self.rating = parse_rating(value)?;
    Ok(())
  }

  pub fn check_cumulative_ratings(&mut self, value: &Value) -> CatalogResult<()> {
    self.cumulative_ratings = parse_cumulative_ratings(value)?;
    Ok(())
  }

  pub fn check_no_of_users_rated(&mut self, value: &Value) -> CatalogResult<()> {
    self.no_of_users_rated = parse_no_of_users_rated(value)?;
    Ok(())
  }
}
