use derive_more::Display;

// The three outcomes a caller can get from the stores.
// Nothing in the db module retries or swallows these,
// the HTTP layer decides what they become.
#[derive(Debug, Display)]
pub enum StoreError {
  #[display(fmt = "Validation error: {}", _0)]
  Validation(String),
  #[display(fmt = "Not found: {}", _0)]
  NotFound(String),
  #[display(fmt = "Persistence error: {}", _0)]
  Persistence(String)
}

impl std::error::Error for StoreError {}

// Both the driver and the pool errors are storage failures
// as far as callers are concerned.
impl From<rusqlite::Error> for StoreError {
  fn from(e: rusqlite::Error) -> Self {
    StoreError::Persistence(e.to_string())
  }
}

impl From<r2d2::Error> for StoreError {
  fn from(e: r2d2::Error) -> Self {
    StoreError::Persistence(e.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sqlite_errors_are_persistence_errors() {
    let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StoreError::Persistence(_)));
  }

  #[test]
  fn display_keeps_the_message() {
    let err = StoreError::NotFound("Article 12 does not exist".to_string());
    assert_eq!("Not found: Article 12 does not exist", err.to_string());
  }
}
