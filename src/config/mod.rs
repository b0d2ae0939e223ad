//! # Image Puller Configuration
//!
//! Startup configuration loaded once from environment variables (populated from
//! the controller deployment's ConfigMap via `envFrom`).
//!
//! The result is an immutable snapshot; there is no hot-reload.

mod environment;
mod error;
mod images;
mod resolver;
mod types;

pub use environment::{MapEnvironment, ProcessEnvironment, RawEnvironment};
pub use error::ConfigError;
pub use images::{parse_images, ParsedImages};
pub use resolver::{parse_bool_literal, ConfigResolver};
pub use types::{CachingResources, ResolvedConfig, TolerationRecord};

/// Load configuration from the process environment
///
/// # Errors
///
/// Returns `ConfigError` on fatal misconfiguration.
pub fn load_config() -> Result<ResolvedConfig, ConfigError> {
    load_config_from(ProcessEnvironment)
}

/// Load configuration from any environment source
///
/// # Errors
///
/// Returns `ConfigError` on fatal misconfiguration.
pub fn load_config_from<E: RawEnvironment>(env: E) -> Result<ResolvedConfig, ConfigError> {
    ConfigResolver::new(env).resolve()
}
