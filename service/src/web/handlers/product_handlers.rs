// service/src/web/handlers/product_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use catalog::{CatalogError, Product, ProductFilter, MAX_RATE};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Query string of `GET /products`. At most one filter applies; the first non-empty one
/// in field order wins.
#[derive(Deserialize, Debug, Default)]
pub struct ListProductsQuery {
  pub name: Option<String>,
  pub category: Option<String>,
  pub price: Option<String>,
  pub rating: Option<String>,
  pub available: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, CatalogError> {
  raw.parse::<f64>().map_err(|_| CatalogError::InvalidType {
    field,
    expected: "number",
    found: "string",
  })
}

impl ListProductsQuery {
  pub fn to_filter(&self) -> Result<ProductFilter, CatalogError> {
    if let Some(name) = non_empty(&self.name) {
      return Ok(ProductFilter::Name(name.to_string()));
    }
    if let Some(category) = non_empty(&self.category) {
      return Ok(ProductFilter::Category(category.to_string()));
    }
    if let Some(raw) = non_empty(&self.price) {
      let ceiling = parse_number("price", raw)?;
      if !(ceiling >= 0.0) {
        return Err(CatalogError::OutOfRange {
          field: "price",
          value: raw.to_string(),
        });
      }
      return Ok(ProductFilter::MaxPrice(ceiling));
    }
    if let Some(raw) = non_empty(&self.rating) {
      let floor = parse_number("rating", raw)?;
      if !(floor > 0.0 && floor <= MAX_RATE) {
        return Err(CatalogError::OutOfRange {
          field: "rating",
          value: raw.to_string(),
        });
      }
      return Ok(ProductFilter::MinRating(floor));
    }
    if let Some(raw) = non_empty(&self.available) {
      return match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(ProductFilter::Availability(true)),
        "false" => Ok(ProductFilter::Availability(false)),
        _ => Err(CatalogError::InvalidType {
          field: "available",
          expected: "boolean",
          found: "string",
        }),
      };
    }
    Ok(ProductFilter::All)
  }
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  info!("Request for Product List");
  let filter = query_params.to_filter()?;
  let products = app_state.store.list(&filter).await?;
  info!("Returning {} products", products.len());
  let results: Vec<Value> = products.iter().map(Product::serialize).collect();
  Ok(HttpResponse::Ok().json(results))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(app_state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request for product with id: {}", product_id);

  match app_state.store.read(product_id).await? {
    Some(product) => {
      info!("Returning product: {}", product.name);
      Ok(HttpResponse::Ok().json(product.serialize()))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(CatalogError::NotFound { id: product_id }.into())
    }
  }
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  info!("Request to create a product");
  let product = Product::deserialize(&body)?;
  let created = app_state.store.create(&product).await?;
  let id = created.id.ok_or(CatalogError::MissingIdentifier)?;
  let location = app_state.url_for(&format!("/products/{}", id));

  info!("Product with ID [{}] created.", id);
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location))
      .json(created.serialize()),
  )
}

#[instrument(name = "handler::update_product", skip(app_state, path, body), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request to update product with id: {}", product_id);

  let mut product = app_state
    .store
    .read(product_id)
    .await?
    .ok_or(CatalogError::NotFound { id: product_id })?;
  product.deserialize_into(&body)?;
  let updated = app_state.store.update(&product).await?;

  info!("Product with ID [{}] updated.", product_id);
  Ok(HttpResponse::Ok().json(updated.serialize()))
}

/// Deleting an unknown id is not an error: the resource is gone either way.
#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request to delete product with id: {}", product_id);
  let removed = app_state.store.delete(product_id).await?;
  info!(removed, "Product with ID [{}] delete complete.", product_id);
  Ok(HttpResponse::NoContent().finish())
}
