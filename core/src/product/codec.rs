// core/src/product/codec.rs

//! JSON mapping <-> Product.

use crate::error::{CatalogError, CatalogResult};
use crate::product::model::Product;
use crate::product::validate::{self, json_type_name};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

/// Keys that must be present, in the order their absence is reported.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "description", "category", "price", "available"];

fn required<'a>(map: &'a Map<String, Value>, field: &'static str) -> &'a Value {
  // Presence is checked up front in `deserialize`; Null keeps this total.
  map.get(field).unwrap_or(&Value::Null)
}

fn optional<T>(
  map: &Map<String, Value>,
  field: &str,
  parse: impl Fn(&Value) -> CatalogResult<Option<T>>,
  fallback: Option<T>,
) -> CatalogResult<Option<T>> {
  match map.get(field) {
    Some(value) => parse(value),
    None => Ok(fallback),
  }
}

impl Product {
  /// Builds a validated, unsaved product from a JSON mapping.
  ///
  /// Checks run in a fixed order so the reported error is deterministic:
  /// 1. the input must be an object (`MalformedInput`);
  /// 2. every key in [`REQUIRED_FIELDS`] must be present (`MissingField`, first one wins);
  /// 3. each field's type, then its range, in declaration order;
  /// 4. the rating fields together: all absent, or all present with `rating` the mean.
  ///
  /// Any `id` in the input is ignored; identifiers are assigned by the store.
  #[instrument(name = "Product::deserialize", level = "debug", skip_all, err(Display))]
  pub fn deserialize(data: &Value) -> CatalogResult<Self> {
    let product = Self::from_json(data, None)?;
    debug!(product = %product, "Deserialization done.");
    Ok(product)
  }

  /// Replaces every field except `id` with the contents of `data`.
  ///
  /// Rating keys missing from `data` keep their current values, so a full-record update
  /// that leaves them out does not erase the rating history. The input is validated into a
  /// staging value first, so on error `self` is unchanged.
  pub fn deserialize_into(&mut self, data: &Value) -> CatalogResult<()> {
    let mut staged = Self::from_json(data, Some(self))?;
    staged.id = self.id;
    *self = staged;
    Ok(())
  }

  fn from_json(data: &Value, base: Option<&Product>) -> CatalogResult<Self> {
    let map = data.as_object().ok_or(CatalogError::MalformedInput {
      found: json_type_name(data),
    })?;

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !map.contains_key(**field)) {
      return Err(CatalogError::MissingField { field: *missing });
    }

    let product = Self {
      id: None,
      name: validate::parse_name(required(map, "name"))?,
      description: validate::parse_description(required(map, "description"))?,
      category: validate::parse_category(required(map, "category"))?,
      price: validate::parse_price(required(map, "price"))?,
      available: validate::parse_available(required(map, "available"))?,
      rating: optional(map, "rating", validate::parse_rating, base.and_then(|b| b.rating))?,
      cumulative_ratings: optional(
        map,
        "cumulative_ratings",
        validate::parse_cumulative_ratings,
        base.and_then(|b| b.cumulative_ratings),
      )?,
      no_of_users_rated: optional(
        map,
        "no_of_users_rated",
        validate::parse_no_of_users_rated,
        base.and_then(|b| b.no_of_users_rated),
      )?,
    };
    validate::validate_rating_state(product.rating, product.cumulative_ratings, product.no_of_users_rated)?;
    Ok(product)
  }

  /// Projects all nine fields into a JSON object. Absent values become explicit `null`s.
  pub fn serialize(&self) -> Value {
    json!({
      "id": self.id,
      "name": self.name,
      "description": self.description,
      "category": self.category,
      "price": self.price,
      "available": self.available,
      "rating": self.rating,
      "cumulative_ratings": self.cumulative_ratings,
      "no_of_users_rated": self.no_of_users_rated,
    })
  }
}
