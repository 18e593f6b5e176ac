// service/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub app_base_url: String,

  // None selects the in-memory store
  pub database_url: Option<String>,
  pub db_max_connections: u32,

  pub rating_max_attempts: usize,

  pub log_json: bool,

  // Optional: insert sample products on startup
  pub seed_db: bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      app_base_url: "http://127.0.0.1:8080".to_string(),
      database_url: None,
      db_max_connections: 5,
      rating_max_attempts: catalog::rating::DEFAULT_MAX_ATTEMPTS,
      log_json: false,
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let app_base_url = get_env("APP_BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let rating_max_attempts = get_env("RATING_MAX_ATTEMPTS")
      .unwrap_or_else(|_| catalog::rating::DEFAULT_MAX_ATTEMPTS.to_string())
      .parse::<usize>()
      .map_err(|e| AppError::Config(format!("Invalid RATING_MAX_ATTEMPTS: {}", e)))?;
    if rating_max_attempts == 0 {
      return Err(AppError::Config("RATING_MAX_ATTEMPTS must be at least 1".to_string()));
    }

    let log_json = get_env("LOG_FORMAT")
      .map(|format| format.eq_ignore_ascii_case("json"))
      .unwrap_or(false);

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    Ok(Self {
      server_host,
      server_port,
      app_base_url,
      database_url,
      db_max_connections,
      rating_max_attempts,
      log_json,
      seed_db,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
