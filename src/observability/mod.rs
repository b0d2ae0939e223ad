//! # Observability
//!
//! Metrics for configuration resolution. Tracing setup lives in
//! `runtime::initialization`.

pub mod metrics;
