use actix_web::{
  error::ResponseError,
  http::StatusCode,
  HttpResponse
};
use derive_more::Display;
use log::error;
use crate::db::StoreError;

// Database and internal errors only show a generic
// message, the full error output should only appear
// in logs. Not found and bad request messages come
// from our own code and are fine to show.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "Internal Server Error")]
  InternalServerError(String),
  #[display(fmt = "Database Error")]
  DatabaseError(String),
  #[display(fmt = "Not Found: {}", _0)]
  NotFound(String),
  #[display(fmt = "Bad Request: {}", _0)]
  BadRequest(String)
}

// Plain text error responses, same as the rest of the API
// returns JSON only on success.
impl ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self {
      Error::InternalServerError(_) | Error::DatabaseError(_) =>
        StatusCode::INTERNAL_SERVER_ERROR,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code()).body(self.to_string())
  }
}

impl From<StoreError> for Error {
  fn from(e: StoreError) -> Self {
    match e {
      StoreError::Validation(msg) => Error::BadRequest(msg),
      StoreError::NotFound(msg) => Error::NotFound(msg),
      StoreError::Persistence(msg) => {
        error!("Storage failure - {}", msg);
        Error::DatabaseError(msg)
      }
    }
  }
}
