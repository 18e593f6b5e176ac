// service/src/seed.rs

//! Sample products, inserted on startup when `SEED_DB=true`.

use catalog::{CatalogResult, Product, ProductStore};
use tracing::info;

const SAMPLES: [(&str, &str, &str, f64, bool); 4] = [
  ("shirt", "Relaxed Fit", "men's clothing", 24.99, true),
  ("sweater", "Slim Fit", "women's clothing", 49.5, true),
  ("pants", "Relaxed Fit", "men's clothing", 35.0, false),
  ("lounge_wear", "unavailable", "women's clothing", 18.75, true),
];

/// Inserts the samples into an empty store. A store that already has rows is left alone.
pub async fn seed_products(store: &dyn ProductStore) -> CatalogResult<usize> {
  if !store.list(&catalog::ProductFilter::All).await?.is_empty() {
    info!("Store already has products; skipping seed.");
    return Ok(0);
  }
  for (name, description, category, price, available) in SAMPLES {
    let product = Product::new(name, description, category, price, available)?;
    store.create(&product).await?;
  }
  info!("Seeded {} sample products.", SAMPLES.len());
  Ok(SAMPLES.len())
}
