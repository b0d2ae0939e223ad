//! Kubernetes Image Puller Library
//!
//! Startup configuration for the image puller controller: environment
//! resolution, validation and defaults, plus conversion into Kubernetes types.
//! Tests are included in the module files and under `tests/`.

pub mod config;
pub mod constants;
pub mod observability;
pub mod runtime;
pub mod workload;

// Re-export config types for convenience
pub use config::{
    load_config, load_config_from, ConfigError, ConfigResolver, MapEnvironment,
    ProcessEnvironment, RawEnvironment, ResolvedConfig, TolerationRecord,
};
