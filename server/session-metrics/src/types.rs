//! Core types for the metrics engine (JSON contracts + internal models).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::config::Config;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the drain collected)
// ---------------------------------------------------------------------------

/// One raw drain record as stored in the batch document. Every field is
/// optional at the wire level; unknown fields are silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
  #[serde(default)]
  pub level: Option<String>,
  /// Epoch milliseconds. The drain stores these as JSON numbers.
  #[serde(default)]
  pub ts: Option<f64>,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub path: Option<String>,
  /// Correlation key tying this record to a request session.
  #[serde(default, rename = "requestID")]
  pub request_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Severity enum (normalized)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
  Debug,
  Info,
  Warning,
  Error,
}

impl Level {
  /// Unrecognized severities map to None and count as non-error.
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "debug" | "trace" => Some(Self::Debug),
      "info" => Some(Self::Info),
      "warning" | "warn" => Some(Self::Warning),
      "error" | "err" | "fatal" => Some(Self::Error),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Component attribution
// ---------------------------------------------------------------------------

/// Which component a record's time is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
  Application,
  Database,
  Cache,
}

impl Component {
  /// Classify a record by its message prefix. Anything without a
  /// recognized prefix belongs to the application itself.
  pub fn from_message(message: &str, config: &Config) -> Self {
    if message.starts_with(&config.cache_prefix) {
      Self::Cache
    } else if message.starts_with(&config.database_prefix) {
      Self::Database
    } else {
      Self::Application
    }
  }
}

// ---------------------------------------------------------------------------
// Internal normalized types
// ---------------------------------------------------------------------------

/// Canonical internal record after normalization + validation.
#[derive(Debug, Clone)]
pub struct LogRecord {
  pub level: Option<Level>,
  /// Epoch milliseconds; None when the raw record had no usable timestamp.
  pub timestamp: Option<f64>,
  pub message: String,
  pub path: Option<String>,
  pub session_id: Option<String>,
}

impl LogRecord {
  pub fn is_error(&self) -> bool {
    self.level == Some(Level::Error)
  }
}

// ---------------------------------------------------------------------------
// Session store (per-batch, in-memory)
// ---------------------------------------------------------------------------

/// All sessions of one batch, keyed by session id.
///
/// Built once by the grouper; the metrics only read it. Record order within
/// a session is arrival order. Session iteration order is unspecified; no
/// metric depends on it.
#[derive(Debug, Default)]
pub struct SessionStore {
  sessions: HashMap<String, Vec<LogRecord>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a record to its session, creating the session on first sight.
  pub fn push(&mut self, session_id: String, record: LogRecord) {
    self.sessions.entry(session_id).or_default().push(record);
  }

  pub fn session_count(&self) -> usize {
    self.sessions.len()
  }

  /// Total record count across all sessions.
  pub fn record_count(&self) -> usize {
    self.sessions.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.sessions.is_empty()
  }

  pub fn sessions(&self) -> impl Iterator<Item = (&str, &[LogRecord])> {
    self
      .sessions
      .iter()
      .map(|(id, records)| (id.as_str(), records.as_slice()))
  }

  pub fn get(&self, session_id: &str) -> Option<&[LogRecord]> {
    self.sessions.get(session_id).map(Vec::as_slice)
  }
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// Average time spent per component, in the same unit as input timestamps
/// (epoch milliseconds), averaged over all sessions in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentTimes {
  pub application: f64,
  pub database: f64,
  pub cache: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
  pub session_count: usize,
  pub record_count: usize,
  /// Percentage of records at ERROR level; 0.0 for an empty batch.
  pub error_rate: f64,
  /// Mean of per-session spans (max ts - min ts), milliseconds.
  pub avg_session_duration_ms: f64,
  /// Mean number of sessions starting per distinct UTC day.
  pub avg_sessions_per_day: f64,
  /// Sessions starting per UTC day, keyed by YYYYMMDD.
  pub daily_sessions: BTreeMap<String, u64>,
  /// Sessions per endpoint (first path seen in each session).
  pub endpoint_distribution: BTreeMap<String, u64>,
  pub component_times: ComponentTimes,
}
