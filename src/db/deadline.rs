use std::time::{Duration, Instant};
use super::{Result, StoreError};

/// Point in time after which a store operation gives up.
///
/// Every store call takes one. It is checked once a connection
/// has been obtained and again right before a write commits, so
/// an expired deadline never leaves half a row behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
  at: Option<Instant>
}

impl Deadline {

  pub fn none() -> Self {
    Self { at: None }
  }

  pub fn after(timeout: Duration) -> Self {
    Self { at: Some(Instant::now() + timeout) }
  }

  // None means unbounded.
  pub fn remaining(&self) -> Option<Duration> {
    self.at.map(|at| at.saturating_duration_since(Instant::now()))
  }

  pub fn is_expired(&self) -> bool {
    match self.at {
      Some(at) => Instant::now() >= at,
      None => false
    }
  }

  pub fn check(&self) -> Result<()> {
    if self.is_expired() {
      Err(StoreError::Persistence(String::from("Deadline exceeded")))
    } else {
      Ok(())
    }
  }

  // SQLite busy timeout to use for the operation: never
  // longer than what's left before the deadline.
  pub fn busy_timeout(&self, default: Duration) -> Duration {
    match self.remaining() {
      Some(left) => left.min(default),
      None => default
    }
  }

}
