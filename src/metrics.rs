//! Import run metrics
//!
//! Counters go through the `metrics` facade. Without an installed recorder
//! the calls are no-ops, so short CLI runs pay nothing for them.

pub const ROWS_CREATED: &str = "tour_import_rows_created_total";
pub const ROWS_FAILED: &str = "tour_import_rows_failed_total";
pub const ROWS_SKIPPED: &str = "tour_import_rows_skipped_total";
pub const REQUEST_DURATION: &str = "tour_import_request_duration_seconds";
pub const PIXELS_CLEARED: &str = "image_cleanup_pixels_cleared_total";

pub struct ImportMetrics;

impl ImportMetrics {
    pub fn record_created() {
        ::metrics::counter!(ROWS_CREATED).increment(1);
    }

    pub fn record_failed() {
        ::metrics::counter!(ROWS_FAILED).increment(1);
    }

    pub fn record_skipped() {
        ::metrics::counter!(ROWS_SKIPPED).increment(1);
    }

    pub fn record_request_duration(duration_secs: f64) {
        ::metrics::histogram!(REQUEST_DURATION).record(duration_secs);
    }

    pub fn record_pixels_cleared(count: usize) {
        ::metrics::counter!(PIXELS_CLEARED).increment(count as u64);
    }
}
