//! Parse the collected batch document and normalize raw records.
//!
//! The drain's store keeps one object per app, keyed by push id:
//!
//! ```json
//! {
//!   "my-app": {
//!     "-Nx91a": {"level": "INFO", "ts": 1000, "message": "boot", "requestID": "r1"},
//!     "-Nx91b": {"level": "ERROR", "ts": 2000, "requestID": "r1"}
//!   }
//! }
//! ```
//!
//! Per-record problems are absorbed (skip + debug log); only an unreadable
//! document or a missing app entry is fatal.

use serde_json::Value;

use crate::error::EngineError;
use crate::types::{Level, LogRecord, RawRecord};

/// Decode the records stored under `app_key` in the batch document.
///
/// Records are returned in document order, which downstream metrics treat
/// as arrival order. Entries that are not objects or whose fields have the
/// wrong shape are skipped without aborting the batch.
pub fn parse_document(raw: &str, app_key: &str) -> Result<Vec<RawRecord>, EngineError> {
  let doc: Value = serde_json::from_str(raw)?;

  let entries = doc
    .get(app_key)
    .ok_or_else(|| EngineError::document(format!("no records under key {:?}", app_key)))?
    .as_object()
    .ok_or_else(|| EngineError::document(format!("entry {:?} is not an object", app_key)))?;

  let mut records = Vec::with_capacity(entries.len());
  let mut skipped = 0usize;
  for (push_id, value) in entries {
    match serde_json::from_value::<RawRecord>(value.clone()) {
      Ok(record) => records.push(record),
      Err(e) => {
        skipped += 1;
        tracing::debug!(push_id = %push_id, error = %e, "Skipping malformed record");
      }
    }
  }
  if skipped > 0 {
    tracing::warn!(skipped, kept = records.len(), "Dropped malformed records from batch");
  }

  Ok(records)
}

/// Normalize a raw record into the canonical internal model.
///
/// Loose severity parse (unrecognized levels count as non-error),
/// non-finite timestamps dropped, empty strings treated as absent.
pub fn normalize(raw: RawRecord) -> LogRecord {
  LogRecord {
    level: raw.level.as_deref().and_then(Level::from_str_loose),
    timestamp: raw.ts.filter(|ts| ts.is_finite()),
    message: raw.message.unwrap_or_default(),
    path: raw.path.filter(|p| !p.is_empty()),
    session_id: raw.request_id.filter(|id| !id.is_empty()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_document_decodes_records_in_order() {
    let json = r#"{
      "my-app": {
        "-Nx1": {"level": "INFO", "ts": 1000, "path": "/a", "requestID": "r1"},
        "-Nx2": {"level": "ERROR", "ts": 2000, "requestID": "r1"},
        "-Nx3": {"level": "INFO", "ts": 1500, "path": "/b", "requestID": "r2"}
      }
    }"#;
    let records = parse_document(json, "my-app").unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].path.as_deref(), Some("/a"));
    assert_eq!(records[1].level.as_deref(), Some("ERROR"));
    assert_eq!(records[2].request_id.as_deref(), Some("r2"));
  }

  #[test]
  fn parse_document_skips_malformed_entries() {
    let json = r#"{
      "my-app": {
        "-Nx1": {"level": "INFO", "ts": 1000, "requestID": "r1"},
        "-Nx2": "not an object",
        "-Nx3": {"ts": "not a number", "requestID": "r2"},
        "-Nx4": {"requestID": "r3"}
      }
    }"#;
    let records = parse_document(json, "my-app").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].request_id.as_deref(), Some("r1"));
    assert_eq!(records[1].request_id.as_deref(), Some("r3"));
  }

  #[test]
  fn parse_document_missing_key_is_fatal() {
    let err = parse_document(r#"{"other-app": {}}"#, "my-app").unwrap_err();
    assert!(err.to_string().contains("my-app"));
  }

  #[test]
  fn parse_document_non_object_entry_is_fatal() {
    let err = parse_document(r#"{"my-app": [1, 2, 3]}"#, "my-app").unwrap_err();
    assert!(err.to_string().contains("not an object"));
  }

  #[test]
  fn parse_document_unreadable_source_is_fatal() {
    assert!(parse_document("{ not json", "my-app").is_err());
  }

  #[test]
  fn normalize_maps_optional_fields() {
    let raw = RawRecord {
      level: Some("ERROR".into()),
      ts: Some(1000.0),
      message: Some("database: timeout".into()),
      path: Some("/checkout".into()),
      request_id: Some("r1".into()),
    };
    let record = normalize(raw);
    assert!(record.is_error());
    assert_eq!(record.timestamp, Some(1000.0));
    assert_eq!(record.path.as_deref(), Some("/checkout"));
    assert_eq!(record.session_id.as_deref(), Some("r1"));
  }

  #[test]
  fn normalize_treats_empty_and_unknown_as_absent() {
    let raw = RawRecord {
      level: Some("verbose".into()),
      ts: Some(f64::NAN),
      message: None,
      path: Some(String::new()),
      request_id: Some(String::new()),
    };
    let record = normalize(raw);
    assert!(record.level.is_none());
    assert!(record.timestamp.is_none());
    assert!(record.message.is_empty());
    assert!(record.path.is_none());
    assert!(record.session_id.is_none());
  }
}
