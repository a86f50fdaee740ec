//! Assemble the computed metrics into the output report.

use crate::config::Config;
use crate::error::EngineError;
use crate::group;
use crate::ingest;
use crate::metrics;
use crate::types::{MetricsReport, SessionStore};

/// Compute all five metrics over a grouped batch.
pub fn analyze(store: &SessionStore, config: &Config) -> MetricsReport {
  MetricsReport {
    session_count: store.session_count(),
    record_count: store.record_count(),
    error_rate: metrics::error_rate(store),
    avg_session_duration_ms: metrics::average_session_duration(store),
    avg_sessions_per_day: metrics::average_sessions_per_day(store),
    daily_sessions: metrics::daily_session_counts(store),
    endpoint_distribution: metrics::endpoint_distribution(store),
    component_times: metrics::component_time_breakdown(store, config),
  }
}

/// Parse, group, and analyze a collected batch document in one call.
///
/// This is the library's main entry point. Per-record anomalies are
/// absorbed along the way; only an unreadable document errors.
pub fn analyze_document(
  raw: &str,
  app_key: &str,
  config: &Config,
) -> Result<MetricsReport, EngineError> {
  let records = ingest::parse_document(raw, app_key)?;
  let normalized: Vec<_> = records.into_iter().map(ingest::normalize).collect();
  let store = group::group_sessions(normalized);

  tracing::info!(
    sessions = store.session_count(),
    records = store.record_count(),
    "Analyzing batch"
  );

  Ok(analyze(&store, config))
}
