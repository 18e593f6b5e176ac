// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use catalog::MemoryStore;
use product_service::{AppConfig, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

pub const BASE_URL: &str = "/products";

pub const NAMES: [&str; 4] = ["shirt", "sweater", "pants", "lounge_wear"];
pub const DESCRIPTIONS: [&str; 3] = ["unavailable", "Relaxed Fit", "Slim Fit"];
pub const CATEGORIES: [&str; 2] = ["men's clothing", "women's clothing"];

pub fn test_state() -> AppState {
  let config = AppConfig {
    app_base_url: "http://localhost".to_string(),
    ..AppConfig::default()
  };
  AppState::new(Arc::new(MemoryStore::new()), Arc::new(config))
}

/// JSON body for the `n`th fake product. Prices stay inside [10, 100] and always carry a
/// fractional part so they serialize as floats.
pub fn product_json(n: usize) -> Value {
  json!({
    "name": NAMES[n % NAMES.len()],
    "description": DESCRIPTIONS[n % DESCRIPTIONS.len()],
    "category": CATEGORIES[n % CATEGORIES.len()],
    "price": 10.5 + (n as f64 * 11.0) % 89.0,
    "available": n % 2 == 0,
  })
}

/// Builds the actix test service over `state`.
#[macro_export]
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state))
        .configure(product_service::web::configure_app_routes),
    )
    .await
  };
}

// --- Helper for Tracing Setup ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
