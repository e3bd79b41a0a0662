use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::sync::LazyLock;

pub static PI_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "pi_relay_requests_total",
        "Calls made to the Pi platform API",
        &["route", "outcome"]
    )
    .unwrap()
});

pub static PI_LATENCY: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "pi_relay_latency_seconds",
        "Pi platform API call latency in seconds",
        &["route"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap()
});

pub static INGEST_FORWARDS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "ingest_forward_total",
        "Completed-payment forwards to the ingest endpoint",
        &["outcome"]
    )
    .unwrap()
});

pub static VALIDATION_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "validation_failures_total",
        "Requests rejected before reaching the Pi API",
        &["route"]
    )
    .unwrap()
});

/// Force registration so every series is exported from the first scrape.
pub fn register_metrics() {
    LazyLock::force(&PI_REQUESTS);
    LazyLock::force(&PI_LATENCY);
    LazyLock::force(&INGEST_FORWARDS);
    LazyLock::force(&VALIDATION_FAILURES);
}

pub fn metrics_output() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
