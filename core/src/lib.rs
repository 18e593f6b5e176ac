// core/src/lib.rs

//! Catalog: the validation and rating core of the product service.
//!
//! - [`Product`] with strict, ordered field validation and a lossless JSON codec.
//! - [`RatingAggregator`], which folds rating observations into a running mean and closes
//!   the read-modify-write race with a conditional write.
//! - [`ProductStore`], the persistence seam, plus an in-memory [`MemoryStore`].

pub mod error;
pub mod product;
pub mod rating;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{CatalogError, CatalogResult, ErrorKind};
pub use crate::product::{Product, MAX_DESCRIPTION_LENGTH, MAX_PRICE, MAX_RATE, MIN_PRICE, MIN_RATE};
pub use crate::rating::{fold, RatingAggregator, RatingObservation, RatingStats};
pub use crate::store::{MemoryStore, ProductFilter, ProductStore};
