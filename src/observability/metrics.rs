//! Metrics collection and exposition.
//!
//! # Metrics
//! - `presence_requests_total` (counter): requests by route, status
//! - `presence_request_duration_seconds` (histogram): handler latency by route
//! - `presence_upstream_calls_total` (counter): upstream calls by upstream, outcome
//! - `presence_upstream_duration_seconds` (histogram): upstream latency
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "presence_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("presence_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call. `outcome` is success, failure or transport.
pub fn record_upstream(upstream: &'static str, outcome: &'static str, start: Instant) {
    counter!(
        "presence_upstream_calls_total",
        "upstream" => upstream,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("presence_upstream_duration_seconds", "upstream" => upstream)
        .record(start.elapsed().as_secs_f64());
}
