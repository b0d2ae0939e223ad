//! # Constants
//!
//! Environment variable names and default values used by the image puller.

// Environment variables
pub const CACHING_INTERVAL_HOURS_ENV_VAR: &str = "CACHING_INTERVAL_HOURS";
pub const DAEMONSET_NAME_ENV_VAR: &str = "DAEMONSET_NAME";
pub const NAMESPACE_ENV_VAR: &str = "NAMESPACE";
pub const IMAGES_ENV_VAR: &str = "IMAGES";
pub const CACHING_MEMORY_REQUEST_ENV_VAR: &str = "CACHING_MEMORY_REQUEST";
pub const CACHING_MEMORY_LIMIT_ENV_VAR: &str = "CACHING_MEMORY_LIMIT";
pub const CACHING_CPU_REQUEST_ENV_VAR: &str = "CACHING_CPU_REQUEST";
pub const CACHING_CPU_LIMIT_ENV_VAR: &str = "CACHING_CPU_LIMIT";
pub const NODE_SELECTOR_ENV_VAR: &str = "NODE_SELECTOR";
pub const NODE_TOLERATION_ENV_VAR: &str = "NODE_TOLERATION";

// Defaults
pub const DEFAULT_DAEMONSET_NAME: &str = "kubernetes-image-puller";
pub const DEFAULT_NAMESPACE: &str = "k8s-image-puller";
pub const DEFAULT_CACHING_MEMORY_REQUEST: &str = "1Mi";
pub const DEFAULT_CACHING_MEMORY_LIMIT: &str = "5Mi";
/// Used only when `CACHING_INTERVAL_HOURS` is set but not a positive integer
pub const DEFAULT_CACHING_INTERVAL_HOURS: u32 = 1;
pub const DEFAULT_CACHING_CPU_REQUEST: &str = ".05";
pub const DEFAULT_CACHING_CPU_LIMIT: &str = ".2";
pub const DEFAULT_NODE_SELECTOR: &str = "{}";
pub const DEFAULT_NODE_TOLERATION: &str = "[]";

// Image list syntax
pub const IMAGE_ENTRY_SEPARATOR: char = ';';
pub const IMAGE_ALIAS_SEPARATOR: char = '=';

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "kubernetes_image_puller=info";
