//! metrics-report: print session metrics for a collected batch document
//!
//! Usage:
//!   metrics-report <data.json> [app-key]          # human-readable lines
//!   metrics-report <data.json> [app-key] --json   # full JSON report
//!
//! The app key defaults to the LOG_APP environment variable. Loads the whole
//! document, runs the session metrics engine, prints the report.

use std::env;
use std::fs;
use std::process;

use session_metrics::{analyze_document, Config, MetricsReport};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let json_output = args.iter().any(|a| a == "--json");
    let positional: Vec<_> = args.iter().filter(|a| !a.starts_with('-')).skip(1).collect();

    let path = match positional.first() {
        Some(p) => p.as_str(),
        None => {
            eprintln!("Usage: metrics-report <data.json> [app-key] [--json]");
            eprintln!("  app key falls back to the LOG_APP environment variable");
            process::exit(2);
        }
    };
    let app_key = positional
        .get(1)
        .map(|k| k.to_string())
        .or_else(|| env::var("LOG_APP").ok())
        .unwrap_or_else(|| {
            eprintln!("metrics-report: no app key given and LOG_APP is not set");
            process::exit(2);
        });

    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("metrics-report: cannot read {}: {}", path, e);
        process::exit(2);
    });

    let report = analyze_document(&raw, &app_key, &Config::default()).unwrap_or_else(|e| {
        eprintln!("metrics-report: {}", e);
        process::exit(1);
    });

    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("metrics-report: serialize: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

fn print_report(report: &MetricsReport) {
    println!("sessions:              {}", report.session_count);
    println!("records:               {}", report.record_count);
    println!("error rate:            {:.2}%", report.error_rate);
    println!("avg session duration:  {:.2} ms", report.avg_session_duration_ms);
    println!("avg sessions per day:  {:.2}", report.avg_sessions_per_day);

    if !report.daily_sessions.is_empty() {
        println!("sessions per day:");
        for (day, count) in &report.daily_sessions {
            println!("  {}  {}", day, count);
        }
    }

    if !report.endpoint_distribution.is_empty() {
        println!("endpoints:");
        for (endpoint, count) in &report.endpoint_distribution {
            println!("  {}  {}", endpoint, count);
        }
    }

    println!("avg time per component:");
    println!("  application  {:.2} ms", report.component_times.application);
    println!("  database     {:.2} ms", report.component_times.database);
    println!("  cache        {:.2} ms", report.component_times.cache);
}
