// tests/pg_store_tests.rs
//! Runs against a live PostgreSQL database named by `TEST_DATABASE_URL`. The table is
//! cleared before every test. Without the variable each test returns early.
mod common;

use catalog::{CatalogError, Product, ProductStore, RatingAggregator, RatingObservation, RatingStats};
use common::setup_tracing;
use product_service::db::{self, PgProductStore};
use serial_test::serial;
use std::sync::Arc;
use tracing::warn;

async fn pg_store() -> Option<Arc<PgProductStore>> {
  setup_tracing();
  let url = match std::env::var("TEST_DATABASE_URL") {
    Ok(url) if !url.trim().is_empty() => url,
    _ => {
      warn!("TEST_DATABASE_URL is not set; skipping PostgreSQL store test.");
      return None;
    }
  };
  let store = db::open_store(&url, 5).await.expect("test database is reachable");
  store.clear().await.expect("products table can be cleared");
  Some(Arc::new(store))
}

fn shirt() -> Product {
  Product::new("shirt", "Relaxed Fit", "men's clothing", 20.5, true).unwrap()
}

fn obs(value: f64) -> RatingObservation {
  RatingObservation::new(value).unwrap()
}

#[tokio::test]
#[serial]
async fn test_create_read_update_delete() {
  let Some(store) = pg_store().await else { return };
  let created = store.create(&shirt()).await.unwrap();
  let id = created.id.unwrap();
  assert_eq!(created.rating, None);
  assert_eq!(store.read(id).await.unwrap(), Some(created.clone()));

  let mut edited = created.clone();
  edited.category = "unknown".to_string();
  assert_eq!(store.update(&edited).await.unwrap().category, "unknown");

  assert!(store.delete(id).await.unwrap());
  assert!(!store.delete(id).await.unwrap());
  assert!(matches!(
    store.update(&edited).await.unwrap_err(),
    CatalogError::NotFound { .. }
  ));
}

#[tokio::test]
#[serial]
async fn test_first_swap_matches_null_stats() {
  let Some(store) = pg_store().await else { return };
  let created = store.create(&shirt()).await.unwrap();
  let id = created.id.unwrap();

  let mut rated = created.clone();
  rated.apply_rating(obs(4.0)).unwrap();
  // Expected stats are both NULL in the row.
  let swapped = store
    .swap_rating(id, &RatingStats::default(), &rated)
    .await
    .unwrap()
    .expect("NULL stats compare equal");
  assert_eq!(swapped.no_of_users_rated, Some(1));
  assert_eq!(swapped.cumulative_ratings, Some(4.0));
  assert_eq!(swapped.rating, Some(4.0));
}

#[tokio::test]
#[serial]
async fn test_swap_with_stale_stats_is_rejected() {
  let Some(store) = pg_store().await else { return };
  let created = store.create(&shirt()).await.unwrap();
  let id = created.id.unwrap();

  let mut first = created.clone();
  first.apply_rating(obs(2.0)).unwrap();
  store.swap_rating(id, &RatingStats::of(&created), &first).await.unwrap().unwrap();

  // Same NULL expectation again: the row has moved on.
  let mut late = created.clone();
  late.apply_rating(obs(5.0)).unwrap();
  assert!(store.swap_rating(id, &RatingStats::of(&created), &late).await.unwrap().is_none());
  assert_eq!(store.read(id).await.unwrap().unwrap().rating, Some(2.0));
}

#[tokio::test]
#[serial]
async fn test_swap_on_missing_row_is_not_found() {
  let Some(store) = pg_store().await else { return };
  let created = store.create(&shirt()).await.unwrap();
  let id = created.id.unwrap();
  store.delete(id).await.unwrap();

  let mut rated = created.clone();
  rated.apply_rating(obs(3.0)).unwrap();
  let err = store.swap_rating(id, &RatingStats::of(&created), &rated).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound { id: missing } if missing == id));
}

#[tokio::test]
#[serial]
async fn test_update_keeps_rating_columns() {
  let Some(store) = pg_store().await else { return };
  let created = store.create(&shirt()).await.unwrap();
  let id = created.id.unwrap();
  let aggregator = RatingAggregator::new(store.clone());
  aggregator.submit(id, obs(4.0)).await.unwrap();

  // `created` predates the rating.
  let mut edited = created.clone();
  edited.price = 30.5;
  let saved = store.update(&edited).await.unwrap();
  assert_eq!(saved.price, 30.5);
  assert_eq!(saved.no_of_users_rated, Some(1));
  assert_eq!(saved.rating, Some(4.0));
}

#[tokio::test]
#[serial]
async fn test_concurrent_submissions_all_land() {
  let Some(store) = pg_store().await else { return };
  let id = store.create(&shirt()).await.unwrap().id.unwrap();
  // Every lost swap means another task won, so 20 tasks need at most 20 attempts each.
  let aggregator = RatingAggregator::new(store.clone()).with_max_attempts(20);

  let mut handles = Vec::new();
  for n in 0..20 {
    let aggregator = aggregator.clone();
    handles.push(tokio::spawn(async move {
      aggregator.submit(id, obs(if n % 2 == 0 { 2.0 } else { 4.0 })).await
    }));
  }
  for handle in handles {
    handle.await.unwrap().unwrap();
  }

  let stored = store.read(id).await.unwrap().unwrap();
  assert_eq!(stored.no_of_users_rated, Some(20));
  assert_eq!(stored.cumulative_ratings, Some(60.0));
  assert_eq!(stored.rating, Some(3.0));
}
