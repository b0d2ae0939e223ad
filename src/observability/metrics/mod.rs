//! # Metrics Module
//!
//! Prometheus metrics for configuration resolution, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - Metrics registry setup, registration and text exposition
//! - `config_metrics` - Fallback, malformed entry and fatal error counters

pub mod config_metrics;
pub mod registry;

pub use config_metrics::*;
pub use registry::*;
