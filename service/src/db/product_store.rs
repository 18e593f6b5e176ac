// service/src/db/product_store.rs

use async_trait::async_trait;
use catalog::{CatalogError, CatalogResult, Product, ProductFilter, ProductStore, RatingStats};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, info, instrument};

const COLUMNS: &str = "id, name, description, category, price, available, rating, cumulative_ratings, no_of_users_rated";

#[derive(Debug, Clone, FromRow)]
struct ProductRow {
  id: i64,
  name: String,
  description: String,
  category: String,
  price: f64,
  available: bool,
  rating: Option<f64>,
  cumulative_ratings: Option<f64>,
  no_of_users_rated: Option<i64>,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: Some(row.id),
      name: row.name,
      description: row.description,
      category: row.category,
      price: row.price,
      available: row.available,
      rating: row.rating,
      cumulative_ratings: row.cumulative_ratings,
      no_of_users_rated: row.no_of_users_rated,
    }
  }
}

fn storage(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CatalogError {
  move |e| {
    error!("Database error during {}: {}", operation, e);
    CatalogError::from(anyhow::Error::new(e).context(operation))
  }
}

/// [`ProductStore`] backed by the `products` table.
#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn exists(&self, id: i64) -> CatalogResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = $1")
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage("exists"))?;
    Ok(found.is_some())
  }

  async fn select(&self, clause: &str, bind: Option<QueryArg<'_>>) -> CatalogResult<Vec<Product>> {
    let sql = format!("SELECT {} FROM products {}", COLUMNS, clause);
    let query = sqlx::query_as::<_, ProductRow>(&sql);
    let query = match bind {
      Some(QueryArg::Text(text)) => query.bind(text),
      Some(QueryArg::Float(value)) => query.bind(value),
      Some(QueryArg::Flag(flag)) => query.bind(flag),
      None => query,
    };
    let rows = query.fetch_all(&self.pool).await.map_err(storage("list"))?;
    Ok(rows.into_iter().map(Product::from).collect())
  }
}

enum QueryArg<'a> {
  Text(&'a str),
  Float(f64),
  Flag(bool),
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "PgProductStore::create", skip_all, fields(name = %product.name), err(Display))]
  async fn create(&self, product: &Product) -> CatalogResult<Product> {
    product.validate()?;
    info!("Creating {}", product.name);
    let sql = format!(
      "INSERT INTO products (name, description, category, price, available, rating, cumulative_ratings, no_of_users_rated) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
      COLUMNS
    );
    let row: ProductRow = sqlx::query_as(&sql)
      .bind(&product.name)
      .bind(&product.description)
      .bind(&product.category)
      .bind(product.price)
      .bind(product.available)
      .bind(product.rating)
      .bind(product.cumulative_ratings)
      .bind(product.no_of_users_rated)
      .fetch_one(&self.pool)
      .await
      .map_err(storage("create"))?;
    Ok(row.into())
  }

  async fn read(&self, id: i64) -> CatalogResult<Option<Product>> {
    debug!("Processing lookup for id {} ...", id);
    let sql = format!("SELECT {} FROM products WHERE id = $1", COLUMNS);
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage("read"))?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "PgProductStore::update", skip_all, fields(id = ?product.id), err(Display))]
  async fn update(&self, product: &Product) -> CatalogResult<Product> {
    let id = product.id.ok_or(CatalogError::MissingIdentifier)?;
    product.validate()?;
    info!("Saving {}", product.name);
    // Rating columns are written by `swap_rating` alone.
    let sql = format!(
      "UPDATE products SET name = $1, description = $2, category = $3, price = $4, available = $5 \
       WHERE id = $6 RETURNING {}",
      COLUMNS
    );
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(&product.name)
      .bind(&product.description)
      .bind(&product.category)
      .bind(product.price)
      .bind(product.available)
      .bind(id)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage("update"))?;
    row.map(Product::from).ok_or(CatalogError::NotFound { id })
  }

  async fn delete(&self, id: i64) -> CatalogResult<bool> {
    info!("Deleting product {}", id);
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(storage("delete"))?;
    Ok(result.rows_affected() > 0)
  }

  async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
    debug!(?filter, "Processing product query");
    match filter {
      ProductFilter::All => self.select("ORDER BY id", None).await,
      ProductFilter::Name(name) => self.select("WHERE name = $1 ORDER BY id", Some(QueryArg::Text(name))).await,
      ProductFilter::Category(category) => {
        self
          .select("WHERE category = $1 ORDER BY id", Some(QueryArg::Text(category)))
          .await
      }
      ProductFilter::MaxPrice(ceiling) => {
        self
          .select("WHERE price <= $1 ORDER BY price DESC, id", Some(QueryArg::Float(*ceiling)))
          .await
      }
      ProductFilter::MinRating(floor) => {
        self
          .select(
            "WHERE rating IS NOT NULL AND rating >= $1 ORDER BY rating DESC, id",
            Some(QueryArg::Float(*floor)),
          )
          .await
      }
      ProductFilter::Availability(available) => {
        self
          .select("WHERE available = $1 ORDER BY id", Some(QueryArg::Flag(*available)))
          .await
      }
    }
  }

  // One conditional UPDATE: the row only changes if nobody else rated it since `expected` was read.
  #[instrument(name = "PgProductStore::swap_rating", skip(self, updated), err(Display))]
  async fn swap_rating(&self, id: i64, expected: &RatingStats, updated: &Product) -> CatalogResult<Option<Product>> {
    let sql = format!(
      "UPDATE products SET rating = $1, cumulative_ratings = $2, no_of_users_rated = $3 \
       WHERE id = $4 AND cumulative_ratings IS NOT DISTINCT FROM $5 AND no_of_users_rated IS NOT DISTINCT FROM $6 \
       RETURNING {}",
      COLUMNS
    );
    let row: Option<ProductRow> = sqlx::query_as(&sql)
      .bind(updated.rating)
      .bind(updated.cumulative_ratings)
      .bind(updated.no_of_users_rated)
      .bind(id)
      .bind(expected.cumulative_ratings)
      .bind(expected.no_of_users_rated)
      .fetch_optional(&self.pool)
      .await
      .map_err(storage("swap_rating"))?;

    if let Some(row) = row {
      return Ok(Some(row.into()));
    }
    // Zero rows: either the stats moved on, or the product is gone.
    if self.exists(id).await? {
      Ok(None)
    } else {
      Err(CatalogError::NotFound { id })
    }
  }

  async fn clear(&self) -> CatalogResult<()> {
    sqlx::query("DELETE FROM products")
      .execute(&self.pool)
      .await
      .map_err(storage("clear"))?;
    Ok(())
  }
}
