//! Structured error types for the metrics engine.
//!
//! Only an unreadable batch document is an error; per-record anomalies are
//! absorbed during ingestion and grouping.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("document: {0}")]
  Document(String),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn document(msg: impl Into<String>) -> Self {
    Self::Document(msg.into())
  }
}
