//! Calendar-day bucketing for epoch-millisecond timestamps.

use chrono::{LocalResult, TimeZone, Utc};

/// Format an epoch-millisecond timestamp as a UTC day key: "YYYYMMDD".
///
/// Four-digit year, so keys sort correctly across centuries. Returns None
/// for non-finite or out-of-range values.
pub fn day_key(epoch_ms: f64) -> Option<String> {
  if !epoch_ms.is_finite() {
    return None;
  }
  match Utc.timestamp_millis_opt(epoch_ms as i64) {
    LocalResult::Single(dt) => Some(dt.format("%Y%m%d").to_string()),
    _ => None,
  }
}
