// service/src/db/mod.rs

//! PostgreSQL persistence for the catalog.

pub mod product_store;

pub use product_store::PgProductStore;

use crate::errors::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

pub const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
  id                 BIGSERIAL PRIMARY KEY,
  name               TEXT NOT NULL,
  description        VARCHAR(63) NOT NULL,
  category           TEXT NOT NULL,
  price              DOUBLE PRECISION NOT NULL,
  available          BOOLEAN NOT NULL DEFAULT FALSE,
  rating             DOUBLE PRECISION,
  cumulative_ratings DOUBLE PRECISION,
  no_of_users_rated  BIGINT
)
"#;

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(max_connections)
    .connect(database_url)
    .await?;
  info!(max_connections, "Successfully connected to the database.");
  Ok(pool)
}

/// Creates the `products` table if it does not exist yet.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
  info!("Initializing database");
  sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
  Ok(())
}

/// Connects, makes sure the table exists and wraps the pool in a [`PgProductStore`].
pub async fn open_store(database_url: &str, max_connections: u32) -> Result<PgProductStore> {
  let pool = connect(database_url, max_connections).await?;
  init_schema(&pool).await?;
  Ok(PgProductStore::new(pool))
}
