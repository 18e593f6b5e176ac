// core/src/store/mod.rs

//! The persistence collaborator.
//!
//! The catalog never talks to a database directly. Everything it needs from storage goes
//! through [`ProductStore`], which is handed in explicitly by whoever builds the service.

pub mod memory;

use crate::error::CatalogResult;
use crate::product::Product;
use crate::rating::RatingStats;
use async_trait::async_trait;
use std::cmp::Ordering;

pub use memory::MemoryStore;

/// Query predicates supported by [`ProductStore::list`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
  All,
  Name(String),
  Category(String),
  /// `price <= ceiling`, most expensive first.
  MaxPrice(f64),
  /// `rating >= floor`, best rated first. Unrated products never match.
  MinRating(f64),
  Availability(bool),
}

impl ProductFilter {
  pub fn matches(&self, product: &Product) -> bool {
    match self {
      ProductFilter::All => true,
      ProductFilter::Name(name) => &product.name == name,
      ProductFilter::Category(category) => &product.category == category,
      ProductFilter::MaxPrice(ceiling) => product.price <= *ceiling,
      ProductFilter::MinRating(floor) => product.rating.is_some_and(|rating| rating >= *floor),
      ProductFilter::Availability(available) => product.available == *available,
    }
  }

  /// Puts `products` in the order `list` promises for this filter.
  pub fn sort(&self, products: &mut [Product]) {
    match self {
      ProductFilter::MaxPrice(_) => {
        products.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal).then(a.id.cmp(&b.id)))
      }
      ProductFilter::MinRating(_) => products.sort_by(|a, b| {
        b.rating
          .partial_cmp(&a.rating)
          .unwrap_or(Ordering::Equal)
          .then(a.id.cmp(&b.id))
      }),
      _ => products.sort_by_key(|product| product.id),
    }
  }
}

/// Durable create/read/update/delete/query operations on products.
///
/// Each call must be individually atomic. `swap_rating` is the only conditional write and
/// is what makes concurrent rating submissions safe.
#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Inserts `product` (its `id` is ignored) and returns the stored row with its new id.
  async fn create(&self, product: &Product) -> CatalogResult<Product>;

  async fn read(&self, id: i64) -> CatalogResult<Option<Product>>;

  /// Overwrites the descriptive fields of the stored row (name, description, category, price,
  /// available) and returns the stored row. The rating fields are left as stored; only
  /// `swap_rating` writes them. `MissingIdentifier` without an id, `NotFound` if the row is gone.
  async fn update(&self, product: &Product) -> CatalogResult<Product>;

  /// Returns whether a row was removed.
  async fn delete(&self, id: i64) -> CatalogResult<bool>;

  async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>>;

  /// Writes the three rating fields of `updated` to row `id`, but only if the row's current
  /// stats still equal `expected`. `Ok(None)` means another writer got there first.
  async fn swap_rating(&self, id: i64, expected: &RatingStats, updated: &Product) -> CatalogResult<Option<Product>>;

  /// Removes every row. A reset helper for tests and tooling.
  async fn clear(&self) -> CatalogResult<()>;
}
