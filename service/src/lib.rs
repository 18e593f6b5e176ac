// service/src/lib.rs

//! HTTP transport and PostgreSQL persistence for the product catalog.

pub mod config;
pub mod db;
pub mod errors;
pub mod seed;
pub mod state;
pub mod telemetry;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
