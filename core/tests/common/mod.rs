// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use catalog::{CatalogResult, MemoryStore, Product, ProductFilter, ProductStore, RatingStats};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::Level;

// --- Product factory ---

pub const NAMES: [&str; 4] = ["shirt", "sweater", "pants", "lounge_wear"];
pub const DESCRIPTIONS: [&str; 3] = ["unavailable", "Relaxed Fit", "Slim Fit"];
pub const CATEGORIES: [&str; 2] = ["men's clothing", "women's clothing"];

/// Deterministic stand-in for a fuzzy factory: `n` picks the field values.
pub fn product_n(n: usize) -> Product {
  Product::new(
    NAMES[n % NAMES.len()],
    DESCRIPTIONS[n % DESCRIPTIONS.len()],
    CATEGORIES[n % CATEGORIES.len()],
    10.0 + (n as f64 * 7.25) % 90.0,
    n % 2 == 0,
  )
  .expect("factory values are in range")
}

// --- Store wrappers ---

/// Delays every read so concurrent submissions are guaranteed to read the same snapshot,
/// and counts how many swaps were rejected.
pub struct RacingStore {
  pub inner: MemoryStore,
  pub read_delay: Duration,
  pub rejected_swaps: AtomicUsize,
}

impl RacingStore {
  pub fn new(read_delay: Duration) -> Self {
    Self {
      inner: MemoryStore::new(),
      read_delay,
      rejected_swaps: AtomicUsize::new(0),
    }
  }

  pub fn rejected(&self) -> usize {
    self.rejected_swaps.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ProductStore for RacingStore {
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.create(product).await
  }

  async fn read(&self, id: i64) -> CatalogResult<Option<Product>> {
    let snapshot = self.inner.read(id).await?;
    tokio::time::sleep(self.read_delay).await;
    Ok(snapshot)
  }

  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.update(product).await
  }

  async fn delete(&self, id: i64) -> CatalogResult<bool> {
    self.inner.delete(id).await
  }

  async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    self.inner.list(filter).await
  }

  async fn swap_rating(&self, id: i64, expected: &RatingStats, updated: &Product) -> CatalogResult<Option<Product>> {
    let swapped = self.inner.swap_rating(id, expected, updated).await?;
    if swapped.is_none() {
      self.rejected_swaps.fetch_add(1, Ordering::SeqCst);
    }
    Ok(swapped)
  }

  async fn clear(&self) -> CatalogResult<()> {
    self.inner.clear().await
  }
}

/// Reads succeed but every conditional write loses.
pub struct AlwaysContendedStore {
  pub inner: MemoryStore,
  pub swap_calls: AtomicUsize,
}

impl AlwaysContendedStore {
  pub fn new() -> Self {
    Self {
      inner: MemoryStore::new(),
      swap_calls: AtomicUsize::new(0),
    }
  }
}

#[async_trait]
impl ProductStore for AlwaysContendedStore {
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.create(product).await
  }

  async fn read(&self, id: i64) -> CatalogResult<Option<Product>> {
    self.inner.read(id).await
  }

  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    self.inner.update(product).await
  }

  async fn delete(&self, id: i64) -> CatalogResult<bool> {
    self.inner.delete(id).await
  }

  async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    self.inner.list(filter).await
  }

  async fn swap_rating(&self, _id: i64, _expected: &RatingStats, _updated: &Product) -> CatalogResult<Option<Product>> {
    self.swap_calls.fetch_add(1, Ordering::SeqCst);
    Ok(None)
  }

  async fn clear(&self) -> CatalogResult<()> {
    self.inner.clear().await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
