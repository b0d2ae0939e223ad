//! # Configuration Metrics
//!
//! Counters for recoverable malformations and fatal errors seen while resolving
//! the environment.

use crate::observability::metrics::registry::register_collector;
use anyhow::Result;
use prometheus::{IntCounter, IntCounterVec};
use std::sync::LazyLock;

// Default substitutions for present-but-malformed values
static CONFIG_FALLBACKS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "image_puller_config_fallbacks_total",
            "Total number of malformed configuration values replaced by their default",
        ),
        &["variable"],
    )
    .expect("Failed to create CONFIG_FALLBACKS_TOTAL metric - this should never happen")
});

static MALFORMED_IMAGE_ENTRIES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "image_puller_config_malformed_image_entries_total",
        "Total number of IMAGES entries skipped as malformed",
    )
    .expect("Failed to create MALFORMED_IMAGE_ENTRIES_TOTAL metric - this should never happen")
});

static FATAL_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "image_puller_config_fatal_errors_total",
            "Total number of fatal configuration errors by reason",
        ),
        &["reason"],
    )
    .expect("Failed to create FATAL_ERRORS_TOTAL metric - this should never happen")
});

/// Register configuration metrics with the registry
pub(crate) fn register_config_metrics() -> Result<()> {
    register_collector(Box::new(CONFIG_FALLBACKS_TOTAL.clone()))?;
    register_collector(Box::new(MALFORMED_IMAGE_ENTRIES_TOTAL.clone()))?;
    register_collector(Box::new(FATAL_ERRORS_TOTAL.clone()))?;
    Ok(())
}

pub fn increment_config_fallbacks(variable: &str) {
    CONFIG_FALLBACKS_TOTAL.with_label_values(&[variable]).inc();
}

/// Current fallback count for a variable
pub fn config_fallbacks_total(variable: &str) -> u64 {
    CONFIG_FALLBACKS_TOTAL.with_label_values(&[variable]).get()
}

pub fn increment_malformed_image_entries() {
    MALFORMED_IMAGE_ENTRIES_TOTAL.inc();
}

pub fn increment_fatal_errors(reason: &str) {
    FATAL_ERRORS_TOTAL.with_label_values(&[reason]).inc();
}
