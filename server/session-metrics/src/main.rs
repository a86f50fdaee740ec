//! Binary entrypoint: read the batch document from stdin, write the report
//! as one JSON object to stdout.
//!
//! The app key (the top-level document entry holding this app's records)
//! comes from the first argument or the LOG_APP environment variable, the
//! same contract the drain receiver uses when it stores records.

use session_metrics::{analyze_document, Config};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    let _ = writeln!(io::stderr(), "session-metrics error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary() -> Result<(), Box<dyn std::error::Error>> {
  let app_key = match std::env::args()
    .nth(1)
    .or_else(|| std::env::var("LOG_APP").ok())
  {
    Some(key) => key,
    None => return Err("usage: session-metrics <app-key> (or set LOG_APP)".into()),
  };

  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;

  let report = analyze_document(&raw, &app_key, &Config::default())?;
  let json = serde_json::to_vec(&report)?;
  io::stdout().write_all(&json)?;
  Ok(())
}
