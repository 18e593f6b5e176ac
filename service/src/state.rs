// service/src/state.rs
use crate::config::AppConfig;
use catalog::{ProductStore, RatingAggregator};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ProductStore>,
  pub ratings: RatingAggregator,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn ProductStore>, config: Arc<AppConfig>) -> Self {
    let ratings = RatingAggregator::new(store.clone()).with_max_attempts(config.rating_max_attempts);
    Self { store, ratings, config }
  }

  /// Absolute URL of a path under the configured base, e.g. `/products/3`.
  pub fn url_for(&self, path: &str) -> String {
    format!("{}{}", self.config.app_base_url.trim_end_matches('/'), path)
  }
}
