use chrono::{DateTime, TimeZone, Utc};

// Dates are stored as unix timestamps and exchanged as
// RFC 3339 strings, always in UTC.
// chrono formatting reference:
// https://docs.rs/chrono/latest/chrono/format/strftime/index.html

pub fn current_timestamp() -> i64 {
  Utc::now().timestamp()
}

pub fn timestamp_to_rfc3339(timestamp: i64) -> String {
  Utc.timestamp_opt(timestamp, 0)
    .single()
    .map(|d| d.to_rfc3339())
    .unwrap_or_default()
}

// Accepts any offset, the timestamp doesn't care.
pub fn rfc3339_to_timestamp(date: &str) -> Option<i64> {
  DateTime::parse_from_rfc3339(date.trim())
    .ok()
    .map(|d| d.timestamp())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn utc_time_formats_as_expected() {
    let timestamp: i64 = 1615150740;
    assert_eq!("2021-03-07T20:59:00+00:00", timestamp_to_rfc3339(timestamp));
  }

  #[test]
  fn offsets_are_taken_into_account() {
    assert_eq!(Some(1615150740), rfc3339_to_timestamp("2021-03-07T21:59:00+01:00"));
    assert_eq!(Some(1615150740), rfc3339_to_timestamp("2021-03-07T20:59:00Z"));
  }

  #[test]
  fn garbage_date_gives_none() {
    assert_eq!(None, rfc3339_to_timestamp("07/03/2021 21:59:00"));
  }

  #[test]
  fn current_timestamp_is_after_2021() {
    assert!(current_timestamp() > 1615150740);
  }
}
