//! Group normalized records into request sessions by correlation id.

use crate::types::{LogRecord, SessionStore};

/// Partition a batch of records into sessions.
///
/// Records without a session id are the expected shape of noise in raw
/// drain output and are discarded here; everything else is kept verbatim,
/// duplicates included, in arrival order.
pub fn group_sessions(records: Vec<LogRecord>) -> SessionStore {
  let mut store = SessionStore::new();
  let mut dropped = 0usize;

  for record in records {
    match record.session_id.clone() {
      Some(id) => store.push(id, record),
      None => dropped += 1,
    }
  }

  if dropped > 0 {
    tracing::debug!(
      dropped,
      sessions = store.session_count(),
      "Discarded uncorrelated records"
    );
  }

  store
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(session_id: Option<&str>, ts: Option<f64>) -> LogRecord {
    LogRecord {
      level: None,
      timestamp: ts,
      message: String::new(),
      path: None,
      session_id: session_id.map(str::to_string),
    }
  }

  #[test]
  fn groups_by_session_id() {
    let store = group_sessions(vec![
      record(Some("s1"), Some(1000.0)),
      record(Some("s2"), Some(1500.0)),
      record(Some("s1"), Some(2000.0)),
    ]);
    assert_eq!(store.session_count(), 2);
    assert_eq!(store.get("s1").unwrap().len(), 2);
    assert_eq!(store.get("s2").unwrap().len(), 1);
  }

  #[test]
  fn drops_records_without_session_id() {
    let store = group_sessions(vec![
      record(None, Some(1000.0)),
      record(Some("s1"), None),
      record(None, None),
    ]);
    assert_eq!(store.session_count(), 1);
    assert_eq!(store.record_count(), 1);
  }

  #[test]
  fn keeps_duplicates_in_arrival_order() {
    let store = group_sessions(vec![
      record(Some("s1"), Some(2000.0)),
      record(Some("s1"), Some(2000.0)),
      record(Some("s1"), Some(1000.0)),
    ]);
    let records = store.get("s1").unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].timestamp, Some(2000.0));
    assert_eq!(records[2].timestamp, Some(1000.0));
  }

  #[test]
  fn empty_input_yields_empty_store() {
    let store = group_sessions(Vec::new());
    assert!(store.is_empty());
    assert_eq!(store.record_count(), 0);
  }
}
