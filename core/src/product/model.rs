// core/src/product/model.rs

use crate::error::CatalogResult;
use crate::product::validate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_PRICE: f64 = 10.00;
pub const MAX_PRICE: f64 = 100.00;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 5.0;
pub const MAX_DESCRIPTION_LENGTH: usize = 63;

/// A catalog product.
///
/// `id` stays `None` until a store assigns one. The three rating fields are either all
/// absent (never rated) or all present, with `rating == cumulative_ratings / no_of_users_rated`
/// once at least one observation has been folded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: Option<i64>,
  pub name: String,
  pub description: String,
  pub category: String,
  pub price: f64,
  pub available: bool,
  pub rating: Option<f64>,
  pub cumulative_ratings: Option<f64>,
  pub no_of_users_rated: Option<i64>,
}

impl Product {
  /// Builds an unrated, unsaved product, checking every field.
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    category: impl Into<String>,
    price: f64,
    available: bool,
  ) -> CatalogResult<Self> {
    let product = Self {
      id: None,
      name: name.into(),
      description: description.into(),
      category: category.into(),
      price,
      available,
      rating: None,
      cumulative_ratings: None,
      no_of_users_rated: None,
    };
    product.validate()?;
    Ok(product)
  }

  /// Re-checks the ranges of every field and the consistency of the rating state. Used by
  /// stores before committing a row.
  pub fn validate(&self) -> CatalogResult<()> {
    validate::validate_name(&self.name)?;
    validate::validate_description(&self.description)?;
    validate::validate_price(self.price)?;
    if let Some(rating) = self.rating {
      validate::validate_rating(rating)?;
    }
    if let Some(cumulative) = self.cumulative_ratings {
      validate::validate_cumulative_ratings(cumulative)?;
    }
    if let Some(count) = self.no_of_users_rated {
      validate::validate_no_of_users_rated(count)?;
    }
    validate::validate_rating_state(self.rating, self.cumulative_ratings, self.no_of_users_rated)
  }

  pub fn is_rated(&self) -> bool {
    self.no_of_users_rated.is_some_and(|count| count > 0)
  }
}

impl fmt::Display for Product {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.id {
      Some(id) => write!(f, "<Product '{}' id=[{}]>", self.name, id),
      None => write!(f, "<Product '{}' id=[None]>", self.name),
    }
  }
}
