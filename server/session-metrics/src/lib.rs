//! Session Metrics Engine — deterministic batch log analytics (MVP).
//!
//! Ingests a collected document of raw drain records, groups them into
//! request sessions by correlation id, and computes aggregate metrics:
//! error rate, session duration, daily session volume, endpoint
//! popularity, and per-component time breakdown.
//!
//! No DB, no network; pure computation over an in-memory batch.

pub mod config;
pub mod date;
pub mod error;
pub mod group;
pub mod ingest;
pub mod metrics;
pub mod report;
pub mod types;

pub use config::Config;
pub use error::EngineError;
pub use report::{analyze, analyze_document};
pub use types::{LogRecord, MetricsReport, RawRecord, SessionStore};
