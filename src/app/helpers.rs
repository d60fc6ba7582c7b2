use actix_web::web;
use log::error;
use crate::db::StoreError;
use super::error::Error;

// The stores are synchronous (rusqlite), so every call
// goes through the blocking thread pool instead of
// stalling an actix worker.
pub async fn run_blocking<F, T>(f: F) -> Result<T, Error>
  where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
  web::block(f)
    .await
    .map_err(|e| {
      error!("Blocking store call was canceled - {}", e);
      Error::InternalServerError(e.to_string())
    })?
    .map_err(Error::from)
}
