//! Metrics collection and exposition.
//!
//! # Metrics
//! - `updown_classifications_total` (counter): verdicts by status
//! - `updown_up_percentage` (gauge): up share of the last non-empty assessment
//! - `updown_fetch_failures_total` (counter): failed fetches by kind
//! - `updown_graphite_requests_total` (counter): proxied Graphite calls by status
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::Status;

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_classification(status: Status, up_percentage: Option<f64>) {
    counter!("updown_classifications_total", "status" => status.as_str()).increment(1);
    if let Some(pct) = up_percentage {
        gauge!("updown_up_percentage").set(pct);
    }
}

pub fn record_fetch_failure(kind: &'static str) {
    counter!("updown_fetch_failures_total", "kind" => kind).increment(1);
}

pub fn record_graphite_request(status: u16) {
    counter!("updown_graphite_requests_total", "status" => status.to_string()).increment(1);
}
