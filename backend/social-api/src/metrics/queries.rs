use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    /// Duration of storage calls by operation, including calls that timed out.
    pub static ref DB_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "social_db_query_duration_seconds",
        "Storage call duration segmented by operation",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("failed to register social_db_query_duration_seconds");

    /// Storage calls by operation and outcome (ok/error/timeout).
    pub static ref DB_QUERY_TOTAL: IntCounterVec = register_int_counter_vec!(
        "social_db_query_total",
        "Storage calls segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register social_db_query_total");
}

pub fn observe_query(operation: &str, outcome: &str, elapsed_secs: f64) {
    DB_QUERY_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(elapsed_secs);
    DB_QUERY_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}
