//! Prometheus metrics collection for CourseHub server

use coursehub_core::{HubStats, PersistEvent};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Instant;

/// Initialize all metric descriptions
pub fn init_metrics() {
    // Counters
    describe_counter!("coursehub_requests_total", "Total number of API requests by operation and outcome");
    describe_counter!("coursehub_errors_total", "Total number of error responses by type");
    describe_counter!("coursehub_persist_writes_total", "Total number of catalog writes by outcome");

    // Histograms
    describe_histogram!("coursehub_request_latency_seconds", "API handler latency in seconds");

    // Gauges
    describe_gauge!("coursehub_courses_count", "Number of courses in the catalog");
    describe_gauge!("coursehub_users_count", "Number of users in the directory");
}

/// Record a handled request
pub fn record_request(operation: &'static str, outcome: &'static str, latency_seconds: f64) {
    counter!("coursehub_requests_total", 1, "operation" => operation, "outcome" => outcome);
    histogram!("coursehub_request_latency_seconds", latency_seconds, "operation" => operation);
}

/// Record an error response
pub fn record_error(error_type: &str) {
    counter!("coursehub_errors_total", 1, "type" => error_type.to_string());
}

/// Record a catalog write outcome
pub fn record_persist(event: &PersistEvent) {
    let outcome = if event.is_failure() { "failed" } else { "written" };
    counter!("coursehub_persist_writes_total", 1, "outcome" => outcome);
}

/// Update gauge metrics
pub fn update_hub_metrics(stats: HubStats) {
    gauge!("coursehub_courses_count", stats.courses as f64);
    gauge!("coursehub_users_count", stats.users as f64);
}

/// Timer for measuring handler latency
pub struct LatencyTimer {
    start: Instant,
    operation: &'static str,
}

impl LatencyTimer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn record(self, outcome: &'static str) {
        record_request(self.operation, outcome, self.start.elapsed().as_secs_f64());
    }

    /// Record "ok" or "error" depending on `result`
    pub fn record_result<T, E>(self, result: &Result<T, E>) {
        self.record(if result.is_ok() { "ok" } else { "error" });
    }
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> = std::sync::OnceLock::new();

/// Initialize Prometheus exporter and return the handle
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Get Prometheus metrics string
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
