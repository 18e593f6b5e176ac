// core/src/rating.rs

//! Incremental rating aggregation.
//!
//! A product's rating is the running mean of every observation submitted for it. Only the
//! sum and the count are stored alongside the mean; each new observation is folded into
//! them and the mean recomputed.

use crate::error::{CatalogError, CatalogResult};
use crate::product::validate::{self, json_type_name};
use crate::product::{Product, MAX_RATE};
use crate::store::ProductStore;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// How many times `RatingAggregator` re-reads and retries after losing a race.
pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

/// One validated rating submission, in `(0, MAX_RATE]`.
///
/// The lower bound is exclusive: a stored rating may be `0.0`, but nobody submits a zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingObservation(f64);

impl RatingObservation {
  pub fn new(value: f64) -> CatalogResult<Self> {
    if value > 0.0 && value <= MAX_RATE {
      Ok(Self(value))
    } else {
      Err(CatalogError::OutOfRange {
        field: "rating",
        value: value.to_string(),
      })
    }
  }

  /// Accepts either `{"rating": <number>}` or a bare number. Integers and floats both count.
  pub fn parse(data: &Value) -> CatalogResult<Self> {
    let raw = match data {
      Value::Object(map) => map.get("rating").ok_or(CatalogError::MissingField { field: "rating" })?,
      Value::Number(_) => data,
      other => {
        return Err(CatalogError::MalformedInput {
          found: json_type_name(other),
        })
      }
    };
    let value = raw.as_f64().ok_or(CatalogError::InvalidType {
      field: "rating",
      expected: "number",
      found: json_type_name(raw),
    })?;
    Self::new(value)
  }

  pub fn value(&self) -> f64 {
    self.0
  }
}

/// The accumulator half of a product's rating state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingStats {
  pub cumulative_ratings: Option<f64>,
  pub no_of_users_rated: Option<i64>,
}

impl RatingStats {
  pub fn of(product: &Product) -> Self {
    Self {
      cumulative_ratings: product.cumulative_ratings,
      no_of_users_rated: product.no_of_users_rated,
    }
  }
}

/// Folds `observation` into `stats` and returns the new stats together with the new mean.
///
/// A missing or zero count starts a fresh accumulator, so any stale sum is discarded. A count
/// that cannot be incremented is reported as `OutOfRange` rather than wrapping.
pub fn fold(stats: RatingStats, observation: RatingObservation) -> CatalogResult<(RatingStats, f64)> {
  let (count, cumulative) = match stats.no_of_users_rated {
    Some(count) if count > 0 => {
      let next = count
        .checked_add(1)
        .ok_or_else(|| CatalogError::out_of_range("no_of_users_rated", count))?;
      (next, stats.cumulative_ratings.unwrap_or(0.0) + observation.value())
    }
    _ => (1, observation.value()),
  };
  let next = RatingStats {
    cumulative_ratings: Some(cumulative),
    no_of_users_rated: Some(count),
  };
  Ok((next, cumulative / count as f64))
}

impl Product {
  /// Applies one observation in memory. Nothing is persisted.
  ///
  /// The folded state is range-checked before it is assigned; on error `self` is unchanged.
  pub fn apply_rating(&mut self, observation: RatingObservation) -> CatalogResult<()> {
    let (stats, rating) = fold(RatingStats::of(self), observation)?;
    if let Some(cumulative) = stats.cumulative_ratings {
      validate::validate_cumulative_ratings(cumulative)?;
    }
    validate::validate_rating(rating)?;
    self.cumulative_ratings = stats.cumulative_ratings;
    self.no_of_users_rated = stats.no_of_users_rated;
    self.rating = Some(rating);
    Ok(())
  }
}

/// Folds observations into stored products.
///
/// Each submission is a read-fold-write; the write is a compare-and-swap on the stats that
/// were read, so two concurrent submissions can never overwrite each other's count.
#[derive(Clone)]
pub struct RatingAggregator {
  store: Arc<dyn ProductStore>,
  max_attempts: usize,
}

impl RatingAggregator {
  pub fn new(store: Arc<dyn ProductStore>) -> Self {
    Self {
      store,
      max_attempts: DEFAULT_MAX_ATTEMPTS,
    }
  }

  pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
    self.max_attempts = max_attempts.max(1);
    self
  }

  /// Reads product `id` and folds `observation` into it.
  #[instrument(name = "RatingAggregator::submit", skip(self), err(Display))]
  pub async fn submit(&self, id: i64, observation: RatingObservation) -> CatalogResult<Product> {
    let product = self.store.read(id).await?.ok_or(CatalogError::NotFound { id })?;
    self.apply_rating(&product, observation).await
  }

  /// Folds `observation` into `product`, starting from its current in-memory stats and
  /// re-reading from the store whenever a concurrent writer has moved them on.
  #[instrument(name = "RatingAggregator::apply_rating", skip(self, product), fields(id = ?product.id), err(Display))]
  pub async fn apply_rating(&self, product: &Product, observation: RatingObservation) -> CatalogResult<Product> {
    let id = product.id.ok_or(CatalogError::MissingIdentifier)?;
    let mut current = product.clone();

    for attempt in 1..=self.max_attempts {
      let expected = RatingStats::of(&current);
      let mut updated = current.clone();
      updated.apply_rating(observation)?;

      if let Some(stored) = self.store.swap_rating(id, &expected, &updated).await? {
        info!(
          rating = ?stored.rating,
          no_of_users_rated = ?stored.no_of_users_rated,
          "Product with ID [{}] rating updated.",
          id
        );
        return Ok(stored);
      }

      debug!(attempt, "Rating stats changed concurrently; re-reading product.");
      current = self.store.read(id).await?.ok_or(CatalogError::NotFound { id })?;
    }

    warn!(attempts = self.max_attempts, "Giving up on rating update for product {}.", id);
    Err(CatalogError::RatingConflict {
      id,
      attempts: self.max_attempts,
    })
  }
}
