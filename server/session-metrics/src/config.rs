//! Engine configuration with sane defaults.

/// Tunable record-classification settings.
#[derive(Debug, Clone)]
pub struct Config {
  /// Message prefix attributing a record's time to the cache component.
  pub cache_prefix: String,
  /// Message prefix attributing a record's time to the database component.
  pub database_prefix: String,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      cache_prefix: "cache:".to_string(),
      database_prefix: "database:".to_string(),
    }
  }
}
