// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Every way a catalog operation can fail.
///
/// Validation variants carry the offending field so the transport layer can build a
/// message without parsing strings.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Invalid product: missing {field}")]
  MissingField { field: &'static str },

  #[error("Invalid type for [{field}]: expected {expected}, found {found}")]
  InvalidType {
    field: &'static str,
    expected: &'static str,
    found: &'static str,
  },

  #[error("Invalid range for [{field}]: {value}")]
  OutOfRange { field: &'static str, value: String },

  #[error("Invalid product: body of request contained bad or no data (found {found})")]
  MalformedInput { found: &'static str },

  #[error("Update called with empty ID field")]
  MissingIdentifier,

  #[error("Product with id '{id}' was not found.")]
  NotFound { id: i64 },

  #[error("Rating for product '{id}' kept changing concurrently; gave up after {attempts} attempts")]
  RatingConflict { id: i64, attempts: usize },

  #[error("Storage operation failed. Source: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },
}

/// Field-less discriminant of [`CatalogError`], for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  MissingField,
  InvalidType,
  OutOfRange,
  MalformedInput,
  MissingIdentifier,
  NotFound,
  RatingConflict,
  Storage,
}

impl ErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ErrorKind::MissingField => "missing_field",
      ErrorKind::InvalidType => "invalid_type",
      ErrorKind::OutOfRange => "out_of_range",
      ErrorKind::MalformedInput => "malformed_input",
      ErrorKind::MissingIdentifier => "missing_identifier",
      ErrorKind::NotFound => "not_found",
      ErrorKind::RatingConflict => "rating_conflict",
      ErrorKind::Storage => "storage",
    }
  }

  /// True for the kinds caused by bad client input.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      ErrorKind::MissingField | ErrorKind::InvalidType | ErrorKind::OutOfRange | ErrorKind::MalformedInput
    )
  }
}

impl CatalogError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      CatalogError::MissingField { .. } => ErrorKind::MissingField,
      CatalogError::InvalidType { .. } => ErrorKind::InvalidType,
      CatalogError::OutOfRange { .. } => ErrorKind::OutOfRange,
      CatalogError::MalformedInput { .. } => ErrorKind::MalformedInput,
      CatalogError::MissingIdentifier => ErrorKind::MissingIdentifier,
      CatalogError::NotFound { .. } => ErrorKind::NotFound,
      CatalogError::RatingConflict { .. } => ErrorKind::RatingConflict,
      CatalogError::Storage { .. } => ErrorKind::Storage,
    }
  }

  /// The field a validation error refers to, if any.
  pub fn field(&self) -> Option<&'static str> {
    match self {
      CatalogError::MissingField { field }
      | CatalogError::InvalidType { field, .. }
      | CatalogError::OutOfRange { field, .. } => Some(field),
      _ => None,
    }
  }

  pub(crate) fn out_of_range(field: &'static str, value: impl ToString) -> Self {
    CatalogError::OutOfRange {
      field,
      value: value.to_string(),
    }
  }
}

// Store implementations bubble their driver errors up through anyhow.
impl From<AnyhowError> for CatalogError {
  fn from(err: AnyhowError) -> Self {
    CatalogError::Storage { source: err }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
