//! The five aggregate computations over a grouped batch.
//!
//! Each function is a pure read of the SessionStore; none depends on the
//! others or on session iteration order, so callers may run them in any
//! order. Every function returns a defined value for an empty store.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::date;
use crate::types::{Component, ComponentTimes, LogRecord, SessionStore};

/// Min/max over an iterator of timestamps, tracking explicitly whether any
/// value was seen. None for an empty input, never a sentinel pair.
fn span(timestamps: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
  let mut bounds: Option<(f64, f64)> = None;
  for ts in timestamps {
    bounds = Some(match bounds {
      None => (ts, ts),
      Some((min, max)) => (min.min(ts), max.max(ts)),
    });
  }
  bounds
}

/// Width of a session's span over its timestamped records. Zero when fewer
/// than two distinct timestamps exist.
fn span_width(records: &[LogRecord]) -> f64 {
  span(records.iter().filter_map(|r| r.timestamp))
    .map(|(min, max)| max - min)
    .unwrap_or(0.0)
}

/// Percentage of records at ERROR level across the whole batch.
///
/// Counts raw records, not sessions: a session holding several error
/// records contributes each of them. 0.0 for an empty batch.
pub fn error_rate(store: &SessionStore) -> f64 {
  let total = store.record_count();
  if total == 0 {
    return 0.0;
  }
  let errors = store
    .sessions()
    .flat_map(|(_, records)| records.iter())
    .filter(|r| r.is_error())
    .count();
  100.0 * errors as f64 / total as f64
}

/// Mean of per-session durations (max ts - min ts), in milliseconds.
///
/// A session with fewer than two timestamped records contributes 0, not an
/// uninitialized bound. 0.0 for an empty batch.
pub fn average_session_duration(store: &SessionStore) -> f64 {
  if store.is_empty() {
    return 0.0;
  }
  let total: f64 = store
    .sessions()
    .map(|(_, records)| span_width(records))
    .sum();
  total / store.session_count() as f64
}

/// Sessions starting per UTC day, keyed by YYYYMMDD.
///
/// A session's day comes from its earliest timestamped record; a session
/// with no timestamped record has no day and is not bucketed.
pub fn daily_session_counts(store: &SessionStore) -> BTreeMap<String, u64> {
  let mut daily = BTreeMap::new();
  for (_, records) in store.sessions() {
    let earliest = span(records.iter().filter_map(|r| r.timestamp)).map(|(min, _)| min);
    if let Some(day) = earliest.and_then(date::day_key) {
      *daily.entry(day).or_insert(0) += 1;
    }
  }
  daily
}

/// Mean number of sessions starting per distinct day.
///
/// 0.0 when no session carries a timestamp (no buckets, no division).
pub fn average_sessions_per_day(store: &SessionStore) -> f64 {
  let daily = daily_session_counts(store);
  if daily.is_empty() {
    return 0.0;
  }
  let total: u64 = daily.values().sum();
  total as f64 / daily.len() as f64
}

/// Sessions per endpoint, keyed by the first path seen in each session.
///
/// One count per session no matter how many path-bearing records it holds;
/// a session with no path contributes nothing. The counts therefore sum to
/// the number of path-bearing sessions.
pub fn endpoint_distribution(store: &SessionStore) -> BTreeMap<String, u64> {
  let mut endpoints = BTreeMap::new();
  for (_, records) in store.sessions() {
    if let Some(path) = records.iter().find_map(|r| r.path.as_deref()) {
      *endpoints.entry(path.to_string()).or_insert(0) += 1;
    }
  }
  endpoints
}

/// Average time spent per component across all sessions.
///
/// Per session, timestamped records are partitioned by message prefix and
/// each bucket spans max ts - min ts. A bucket with no qualifying records
/// is excluded from its running sum rather than contributing a stale
/// bound. Each sum is divided by the total session count, matching the
/// all-sessions averaging of session duration.
pub fn component_time_breakdown(store: &SessionStore, config: &Config) -> ComponentTimes {
  let mut application = 0.0f64;
  let mut database = 0.0f64;
  let mut cache = 0.0f64;

  if store.is_empty() {
    return ComponentTimes {
      application,
      database,
      cache,
    };
  }

  for (_, records) in store.sessions() {
    let bucket = |want: Component| {
      span(
        records
          .iter()
          .filter(move |r| Component::from_message(&r.message, config) == want)
          .filter_map(|r| r.timestamp),
      )
      .map(|(min, max)| max - min)
    };

    if let Some(width) = bucket(Component::Application) {
      application += width;
    }
    if let Some(width) = bucket(Component::Database) {
      database += width;
    }
    if let Some(width) = bucket(Component::Cache) {
      cache += width;
    }
  }

  let sessions = store.session_count() as f64;
  ComponentTimes {
    application: application / sessions,
    database: database / sessions,
    cache: cache / sessions,
  }
}
