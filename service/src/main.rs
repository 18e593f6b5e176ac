// service/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use catalog::{MemoryStore, ProductStore};
use product_service::db;
use product_service::{seed, telemetry, web, AppConfig, AppState};
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> io::Result<()> {
  // Load application configuration first: it decides the log format.
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      telemetry::init_tracing(false);
      error!(error = %e, "Failed to load application configuration.");
      return Err(io::Error::new(io::ErrorKind::InvalidInput, e.to_string()));
    }
  };
  telemetry::init_tracing(app_config.log_json);
  info!("Starting product service...");

  let store: Arc<dyn ProductStore> = match app_config.database_url.as_deref() {
    Some(database_url) => {
      let pg_store = db::open_store(database_url, app_config.db_max_connections).await.map_err(|e| {
        error!(error = %e, "Failed to prepare the database.");
        io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
      })?;
      Arc::new(pg_store)
    }
    None => {
      warn!("DATABASE_URL is not set; products will live in memory and vanish on restart.");
      Arc::new(MemoryStore::new())
    }
  };

  if app_config.seed_db {
    if let Err(e) = seed::seed_products(store.as_ref()).await {
      error!(error = %e, "Failed to seed database.");
    }
  }

  let app_state = AppState::new(store, app_config.clone());

  let server_address = app_config.bind_address();
  info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
