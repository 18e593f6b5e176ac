// core/src/store/memory.rs

use crate::error::{CatalogError, CatalogResult};
use crate::product::Product;
use crate::rating::RatingStats;
use crate::store::{ProductFilter, ProductStore};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

#[derive(Debug)]
struct Rows {
  products: BTreeMap<i64, Product>,
  next_id: i64,
}

/// A process-local [`ProductStore`]. Ids are handed out sequentially from 1 and never reused.
///
/// Every operation takes the lock once and releases it before returning, so no guard is
/// ever held across an `.await`.
#[derive(Debug)]
pub struct MemoryStore {
  rows: RwLock<Rows>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self {
      rows: RwLock::new(Rows {
        products: BTreeMap::new(),
        next_id: 1,
      }),
    }
  }

  pub fn len(&self) -> usize {
    self.rows.read().products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for MemoryStore {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ProductStore for MemoryStore {
  #[instrument(name = "MemoryStore::create", skip_all, fields(name = %product.name), err(Display))]
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    product.validate()?;
    let mut rows = self.rows.write();
    let id = rows.next_id;
    rows.next_id += 1;
    let mut stored = product.clone();
    stored.id = Some(id);
    rows.products.insert(id, stored.clone());
    info!("Created {}", stored);
    Ok(stored)
  }

  async fn read(&self, id: i64) -> CatalogResult<Option<Product>> {
    debug!("Processing lookup for id {} ...", id);
    Ok(self.rows.read().products.get(&id).cloned())
  }

  #[instrument(name = "MemoryStore::update", skip_all, fields(id = ?product.id), err(Display))]
  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    let id = product.id.ok_or(CatalogError::MissingIdentifier)?;
    product.validate()?;
    let mut rows = self.rows.write();
    let slot = rows.products.get_mut(&id).ok_or(CatalogError::NotFound { id })?;
    slot.name.clone_from(&product.name);
    slot.description.clone_from(&product.description);
    slot.category.clone_from(&product.category);
    slot.price = product.price;
    slot.available = product.available;
    info!("Saved {}", slot);
    Ok(slot.clone())
  }

  async fn delete(&self, id: i64) -> CatalogResult<bool> {
    let removed = self.rows.write().products.remove(&id);
    if let Some(product) = &removed {
      info!("Deleted {}", product);
    }
    Ok(removed.is_some())
  }

  async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    debug!(?filter, "Processing product query");
    let mut products: Vec<Product> = {
      let rows = self.rows.read();
      rows.products.values().filter(|p| filter.matches(p)).cloned().collect()
    };
    filter.sort(&mut products);
    Ok(products)
  }

  #[instrument(name = "MemoryStore::swap_rating", skip(self, updated), err(Display))]
  async fn swap_rating(&self, id: i64, expected: &RatingStats, updated: &Product) -> CatalogResult<Option<Product>> {
    let mut rows = self.rows.write();
    let slot = rows.products.get_mut(&id).ok_or(CatalogError::NotFound { id })?;
    if RatingStats::of(slot) != *expected {
      debug!("Stored rating stats moved on; rejecting swap.");
      return Ok(None);
    }
    slot.rating = updated.rating;
    slot.cumulative_ratings = updated.cumulative_ratings;
    slot.no_of_users_rated = updated.no_of_users_rated;
    Ok(Some(slot.clone()))
  }

  async fn clear(&self) -> CatalogResult<()> {
    self.rows.write().products.clear();
    Ok(())
  }
}
