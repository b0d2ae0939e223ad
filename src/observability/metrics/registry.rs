//! # Metrics Registry
//!
//! Prometheus metrics registry setup and registration.
//!
//! No HTTP endpoint is served from here; the embedding controller exposes
//! `gather_metrics()` output on its own server.

use anyhow::Result;
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::LazyLock;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Register all metrics with the Prometheus registry
///
/// Safe to call more than once; collectors that are already registered are skipped.
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn register_metrics() -> Result<()> {
    super::config_metrics::register_config_metrics()?;
    Ok(())
}

/// Register a single collector, ignoring `AlreadyReg`
pub(crate) fn register_collector(collector: Box<dyn prometheus::core::Collector>) -> Result<()> {
    match REGISTRY.register(collector) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Encode all registered metrics in the Prometheus text format
#[allow(
    clippy::missing_errors_doc,
    reason = "Error documentation is provided in doc comments"
)]
pub fn gather_metrics() -> Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
