//! # Initialization
//!
//! Startup logic: tracing subscriber setup, metrics registration and
//! resolution of the configuration snapshot.

use crate::config::{ConfigError, ConfigResolver, RawEnvironment, ResolvedConfig};
use crate::constants;
use crate::observability;
use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{error, info, warn};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "Invalid log format '{other}'. Expected 'text' or 'json'"
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Initialization result containing everything the controller needs to start
#[derive(Debug)]
pub struct InitializationResult {
    /// Immutable configuration snapshot
    pub config: ResolvedConfig,
}

/// Install the global tracing subscriber
///
/// Uses `RUST_LOG` when set, otherwise `kubernetes_image_puller=info`. If a
/// subscriber is already installed (embedding or tests) this only logs a warning.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| constants::DEFAULT_LOG_FILTER.into());

    let result = match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    if let Err(e) = result {
        warn!("Tracing subscriber init returned error (may already be initialized): {}", e);
    }
}

/// Initialize the image puller runtime
///
/// This function handles:
/// - Tracing subscriber setup
/// - Metrics registration
/// - Configuration resolution from `env`
///
/// # Errors
///
/// Returns an error if metrics registration fails or the configuration is
/// fatally misconfigured. The underlying `ConfigError` is kept as the error
/// source so callers can downcast it.
pub fn initialize<E: RawEnvironment>(env: E, log_format: LogFormat) -> Result<InitializationResult> {
    init_tracing(log_format);

    info!("Starting Kubernetes Image Puller v{}", env!("CARGO_PKG_VERSION"));

    observability::metrics::register_metrics().context("Failed to register metrics")?;

    let config = resolve_config(env).context("Failed to resolve configuration")?;
    log_config_summary(&config);

    info!("Configuration resolved, handing over to controller");
    Ok(InitializationResult { config })
}

/// Resolve the configuration snapshot, logging remediation on fatal errors
///
/// The error itself is already logged by the resolver.
///
/// # Errors
///
/// Returns `ConfigError` on fatal misconfiguration.
pub fn resolve_config<E: RawEnvironment>(env: E) -> Result<ResolvedConfig, ConfigError> {
    let span = tracing::span!(
        tracing::Level::INFO,
        "image_puller.startup.resolve_config",
        operation = "resolve_config"
    );
    let _guard = span.enter();

    ConfigResolver::new(env).resolve().inspect_err(|e| {
        error!(
            variable = e.variable(),
            reason = e.as_str(),
            "Remediation: {}",
            e.remediation()
        );
    })
}

fn log_config_summary(config: &ResolvedConfig) {
    info!("Image Puller - Startup Configuration Summary");
    info!("DaemonSet: {}/{}", config.namespace, config.daemonset_name);
    info!("Caching interval: {}h", config.caching_interval_hours);
    info!(
        "Images ({}): {}",
        config.images.len(),
        config.images.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    info!(
        "Resources: memory {}/{}, cpu {}/{} (request/limit)",
        config.resources.memory_request,
        config.resources.memory_limit,
        config.resources.cpu_request,
        config.resources.cpu_limit
    );
    info!(
        "Node selector labels: {}, tolerations: {}",
        config.node_selector.len(),
        config.node_toleration.len()
    );
    if config.images.is_empty() {
        warn!("No valid images configured; the DaemonSet will not cache anything");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapEnvironment;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_initialize_resolves_config() {
        let env = MapEnvironment::new()
            .with(constants::IMAGES_ENV_VAR, "web=img/web:1")
            .with(constants::CACHING_INTERVAL_HOURS_ENV_VAR, "2");
        let result = initialize(env, LogFormat::Text).unwrap();
        assert_eq!(result.config.caching_interval_hours, 2);
        assert_eq!(result.config.images.len(), 1);
    }

    #[test]
    fn test_initialize_keeps_config_error_as_source() {
        let env = MapEnvironment::new().with(constants::CACHING_INTERVAL_HOURS_ENV_VAR, "2");
        let err = initialize(env, LogFormat::Text).unwrap_err();
        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert_eq!(config_err.variable(), constants::IMAGES_ENV_VAR);
    }
}
