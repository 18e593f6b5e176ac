// service/src/web/handlers/rating_handlers.rs

use actix_web::{web, HttpResponse};
use catalog::RatingObservation;
use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

/// `PUT /products/{id}/rating` with body `{"rating": n}`, n in (0, 5].
///
/// The observation is validated before the product is looked up, so a bad body is a 400
/// even for an unknown id.
#[instrument(name = "handler::update_rating", skip(app_state, path, body), fields(product_id = %path.as_ref()))]
pub async fn update_rating_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request to update the rating of the product with id: {}", product_id);

  let observation = RatingObservation::parse(&body)?;
  let product = app_state.ratings.submit(product_id, observation).await?;

  info!(rating = ?product.rating, "Product with ID [{}] updated.", product_id);
  Ok(HttpResponse::Ok().json(product.serialize()))
}
