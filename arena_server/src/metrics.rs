//! Prometheus metrics for monitoring the tournament server.
//!
//! Metrics are exposed in Prometheus text format for scraping when an
//! exporter address is configured. Without one, recording is a no-op.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts, duration, status codes
//! - **Contest Metrics**: Brackets generated per contest type, entries per bracket
//! - **Tournament Metrics**: Winners recorded
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use arena_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("GET", "/health", 200);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tiktok_arena::contest::ContestType;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Contest Metrics
// ============================================================================

/// Increment brackets generated counter for a contest type.
pub fn brackets_generated_total(contest_type: ContestType) {
    metrics::counter!("brackets_generated_total",
        "contest_type" => contest_type.as_str()
    )
    .increment(1);
}

/// Record number of entries seeded into a bracket.
pub fn bracket_entries(count: usize) {
    metrics::histogram!("bracket_entries").record(count as f64);
}

// ============================================================================
// Tournament Metrics
// ============================================================================

/// Increment recorded winners counter.
pub fn winners_recorded_total() {
    metrics::counter!("winners_recorded_total").increment(1);
}
