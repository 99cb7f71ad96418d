//! Prometheus metrics for table command outcomes.
//!
//! Metrics are exposed in Prometheus text format on a dedicated listener
//! when `METRICS_BIND` is configured.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

/// Record one table command and its outcome.
pub fn command_result(command: &'static str, ok: bool) {
    metrics::counter!(
        "table_commands_total",
        "command" => command,
        "outcome" => if ok { "ok" } else { "rejected" }
    )
    .increment(1);
}

/// Record one read-side query.
pub fn query_served(query: &'static str) {
    metrics::counter!("table_queries_total", "query" => query).increment(1);
}
