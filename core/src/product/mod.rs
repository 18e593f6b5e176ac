// core/src/product/mod.rs

//! The Product record: its shape, field constraints and JSON codec.

pub mod codec;
pub mod model;
pub mod validate;

pub use model::{Product, MAX_DESCRIPTION_LENGTH, MAX_PRICE, MAX_RATE, MIN_PRICE, MIN_RATE};
