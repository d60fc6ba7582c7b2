use super::{Result, StoreError};

/**
 * Required text fields can't be empty or only made
 * of whitespace. Runs before we even get a connection.
 */
pub fn require_text(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(StoreError::Validation(format!("{} cannot be empty", field)))
  } else {
    Ok(())
  }
}

pub fn placeholders(count: usize) -> String {
  (1..=count)
    .map(|i| format!("?{}", i))
    .collect::<Vec<String>>()
    .join(", ")
}
