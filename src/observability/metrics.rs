//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define tracker metrics (requests, latency, visits, store errors)
//! - Expose a Prometheus-compatible endpoint on its own listener
//!
//! # Metrics
//! - `tracker_requests_total` (counter): requests by method, path, status
//! - `tracker_request_duration_seconds` (histogram): latency by path
//! - `tracker_visits` (gauge): last count returned by the store
//! - `tracker_store_errors_total` (counter): failed store calls
//!
//! # Design Decisions
//! - The exporter is opt-in and listens on its own address, keeping the
//!   application surface at exactly four routes
//! - Recording macros are no-ops until an exporter is installed

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram,
};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener. Failure is logged,
/// not fatal: the tracker still serves traffic without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "tracker_requests_total",
                "Requests served, by method, path and status"
            );
            describe_histogram!(
                "tracker_request_duration_seconds",
                "Request latency in seconds, by path"
            );
            describe_gauge!(
                "tracker_visits",
                "Most recent visit count returned by the store"
            );
            describe_counter!(
                "tracker_store_errors_total",
                "Failed calls to the counter store"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to install metrics exporter");
        }
    }
}

/// Record one served request.
pub fn record_request(method: &str, path: &str, status: u16, started: Instant) {
    counter!(
        "tracker_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("tracker_request_duration_seconds", "path" => path.to_string())
        .record(started.elapsed().as_secs_f64());
}

/// Record the count returned by a successful store increment.
pub fn record_visit(count: u64) {
    gauge!("tracker_visits").set(count as f64);
}

/// Record a failed store call (increment or probe).
pub fn record_store_error() {
    counter!("tracker_store_errors_total").increment(1);
}
