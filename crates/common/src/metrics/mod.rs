//! Metrics and observability utilities
//!
//! Prometheus-style metrics for the formatting engine with
//! standardized naming conventions.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

use crate::models::SectionType;

/// Metrics prefix for all AnswerForge metrics
pub const METRICS_PREFIX: &str = "answerforge";

/// Histogram buckets for formatting latency (in seconds)
/// Formatting is CPU-bound; most answers land well under 5ms
pub const FORMAT_BUCKETS: &[f64] = &[
    0.0001, // 100us
    0.0005, // 500us
    0.001,  // 1ms
    0.0025, // 2.5ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_answers_formatted_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of answers formatted"
    );

    describe_histogram!(
        format!("{}_format_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Answer formatting latency in seconds"
    );

    describe_counter!(
        format!("{}_sections_total", METRICS_PREFIX),
        Unit::Count,
        "Total content sections produced, by type"
    );

    describe_counter!(
        format!("{}_citations_linked_total", METRICS_PREFIX),
        Unit::Count,
        "Total citation markers resolved to a citation"
    );

    describe_counter!(
        format!("{}_citations_missing_total", METRICS_PREFIX),
        Unit::Count,
        "Total citation markers with no matching citation"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record formatting latency
pub struct FormatTimer {
    start: Instant,
}

impl FormatTimer {
    /// Start timing a format call
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Record completion
    pub fn finish(self) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(format!("{}_answers_formatted_total", METRICS_PREFIX)).increment(1);

        histogram!(format!("{}_format_duration_seconds", METRICS_PREFIX)).record(duration);
    }
}

/// Helper to record section metrics
pub fn record_sections<'a>(types: impl IntoIterator<Item = &'a SectionType>) {
    for section_type in types {
        counter!(
            format!("{}_sections_total", METRICS_PREFIX),
            "type" => section_type.as_str()
        )
        .increment(1);
    }
}

/// Helper to record citation metrics
pub fn record_citations(linked: usize, missing: usize) {
    if linked > 0 {
        counter!(format!("{}_citations_linked_total", METRICS_PREFIX)).increment(linked as u64);
    }
    if missing > 0 {
        counter!(format!("{}_citations_missing_total", METRICS_PREFIX)).increment(missing as u64);
    }
}
