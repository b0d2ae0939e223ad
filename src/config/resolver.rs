//! # Config Resolver
//!
//! Converts a `RawEnvironment` into a `ResolvedConfig`.
//!
//! Failure policy per field:
//!
//! | Field | Absent | Malformed |
//! |---|---|---|
//! | `CACHING_INTERVAL_HOURS` | fatal | warn, default `1` |
//! | `IMAGES` | fatal | entry warned and skipped |
//! | `NODE_SELECTOR` / `NODE_TOLERATION` | default JSON | fatal |
//! | string fields | info, default | n/a |
//! | boolean fields | silent default | silent default |

use crate::config::environment::RawEnvironment;
use crate::config::error::ConfigError;
use crate::config::images::parse_images;
use crate::config::types::{CachingResources, ResolvedConfig, TolerationRecord};
use crate::constants::*;
use crate::observability::metrics;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use tracing::{error, info, warn};

/// Resolves configuration fields from an environment snapshot
///
/// Every operation is independent of the others and reads only the environment.
#[derive(Debug, Clone)]
pub struct ConfigResolver<E> {
    env: E,
}

impl<E: RawEnvironment> ConfigResolver<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Resolve every field into a complete snapshot
    ///
    /// The first fatal error stops resolution; no partial config is returned.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is unset or a JSON field
    /// cannot be decoded.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        Ok(ResolvedConfig {
            daemonset_name: self
                .resolve_string_or_default(DAEMONSET_NAME_ENV_VAR, DEFAULT_DAEMONSET_NAME),
            namespace: self.resolve_string_or_default(NAMESPACE_ENV_VAR, DEFAULT_NAMESPACE),
            images: self.resolve_images()?,
            caching_interval_hours: self.resolve_caching_interval()?,
            resources: CachingResources {
                memory_request: self.resolve_string_or_default(
                    CACHING_MEMORY_REQUEST_ENV_VAR,
                    DEFAULT_CACHING_MEMORY_REQUEST,
                ),
                memory_limit: self.resolve_string_or_default(
                    CACHING_MEMORY_LIMIT_ENV_VAR,
                    DEFAULT_CACHING_MEMORY_LIMIT,
                ),
                cpu_request: self
                    .resolve_string_or_default(CACHING_CPU_REQUEST_ENV_VAR, DEFAULT_CACHING_CPU_REQUEST),
                cpu_limit: self
                    .resolve_string_or_default(CACHING_CPU_LIMIT_ENV_VAR, DEFAULT_CACHING_CPU_LIMIT),
            },
            node_selector: self.resolve_node_selector()?,
            node_toleration: self.resolve_node_toleration()?,
        })
    }

    /// Hours between caching cycles
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingRequired` when `CACHING_INTERVAL_HOURS` is unset.
    /// A value that is not a positive integer is not an error.
    pub fn resolve_caching_interval(&self) -> Result<u32, ConfigError> {
        let raw = self.required(CACHING_INTERVAL_HOURS_ENV_VAR)?;
        // Stricter than a plain integer parse: 0 and negative values also fall back
        match raw.parse::<NonZeroU32>() {
            Ok(interval) => Ok(interval.get()),
            Err(e) => {
                warn!(
                    variable = CACHING_INTERVAL_HOURS_ENV_VAR,
                    error = %e,
                    "Could not parse env var {} to integer. Value is {}. Using default of {}",
                    CACHING_INTERVAL_HOURS_ENV_VAR,
                    raw,
                    DEFAULT_CACHING_INTERVAL_HOURS
                );
                metrics::increment_config_fallbacks(CACHING_INTERVAL_HOURS_ENV_VAR);
                Ok(DEFAULT_CACHING_INTERVAL_HOURS)
            }
        }
    }

    /// Image alias -> reference map from `IMAGES`
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingRequired` when `IMAGES` is unset. Malformed entries
    /// are skipped, so an all-malformed list yields an empty map.
    pub fn resolve_images(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let raw = self.required(IMAGES_ENV_VAR)?;

        info!("Processing images from configuration...");
        let parsed = parse_images(&raw);
        for entry in &parsed.rejected {
            warn!("Malformed image name/tag: {}. Ignoring.", entry);
            metrics::increment_malformed_image_entries();
        }
        for (alias, reference) in &parsed.images {
            info!("Image: {}={}", alias, reference);
        }
        Ok(parsed.images)
    }

    /// Node selector labels from `NODE_SELECTOR` (default `{}`)
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidJson` when the value is not a JSON object of strings.
    pub fn resolve_node_selector(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        self.json_or_default(NODE_SELECTOR_ENV_VAR, DEFAULT_NODE_SELECTOR)
    }

    /// Tolerations from `NODE_TOLERATION` (default `[]`)
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidJson` when the value is not a JSON array of toleration objects.
    pub fn resolve_node_toleration(&self) -> Result<Vec<TolerationRecord>, ConfigError> {
        self.json_or_default(NODE_TOLERATION_ENV_VAR, DEFAULT_NODE_TOLERATION)
    }

    /// Environment value verbatim when set and non-empty, otherwise `default`
    pub fn resolve_string_or_default(&self, name: &str, default: &str) -> String {
        if let Some(value) = self.env.non_empty(name) {
            info!("Using value of {} from environment: {}", name, value);
            value
        } else {
            info!(
                "No value found for {}. Using default value of {}",
                name, default
            );
            default.to_string()
        }
    }

    /// Boolean value when set to a valid literal, otherwise `default`
    ///
    /// Falls back silently; unlike the caching interval, nothing is logged.
    pub fn resolve_bool_or_default(&self, name: &str, default: bool) -> bool {
        self.env
            .lookup(name)
            .and_then(|value| parse_bool_literal(&value))
            .unwrap_or(default)
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.env.non_empty(name).ok_or_else(|| {
            let err = ConfigError::MissingRequired { variable: name };
            error!(variable = name, "{}", err);
            metrics::increment_fatal_errors(err.as_str());
            err
        })
    }

    fn json_or_default<T>(&self, name: &'static str, default: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = self.resolve_string_or_default(name, default);
        // `null` decodes to the empty value, like an empty object/array
        serde_json::from_str::<Option<T>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|source| {
                let err = ConfigError::InvalidJson {
                    variable: name,
                    source,
                };
                error!(variable = name, "{}", err);
                metrics::increment_fatal_errors(err.as_str());
                err
            })
    }
}

/// Parse the standard boolean literals
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; anything else is `None`.
pub fn parse_bool_literal(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::MapEnvironment;

    fn resolver(pairs: &[(&str, &str)]) -> ConfigResolver<MapEnvironment> {
        ConfigResolver::new(pairs.iter().copied().collect())
    }

    #[test]
    fn test_caching_interval_valid() {
        let r = resolver(&[(CACHING_INTERVAL_HOURS_ENV_VAR, "6")]);
        assert_eq!(r.resolve_caching_interval().unwrap(), 6);
    }

    #[test]
    fn test_caching_interval_malformed_uses_default() {
        for raw in ["abc", "0", "-3", " 4", "1.5", "99999999999"] {
            let r = resolver(&[(CACHING_INTERVAL_HOURS_ENV_VAR, raw)]);
            assert_eq!(
                r.resolve_caching_interval().unwrap(),
                DEFAULT_CACHING_INTERVAL_HOURS,
                "value {raw:?} should fall back to the default"
            );
        }
    }

    #[test]
    fn test_caching_interval_unset_is_fatal() {
        let r = resolver(&[]);
        let err = r.resolve_caching_interval().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired {
                variable: CACHING_INTERVAL_HOURS_ENV_VAR
            }
        ));
    }

    #[test]
    fn test_caching_interval_empty_is_fatal() {
        let r = resolver(&[(CACHING_INTERVAL_HOURS_ENV_VAR, "")]);
        assert!(r.resolve_caching_interval().is_err());
    }

    #[test]
    fn test_images_unset_is_fatal() {
        let err = resolver(&[]).resolve_images().unwrap_err();
        assert_eq!(err.variable(), IMAGES_ENV_VAR);
    }

    #[test]
    fn test_node_selector_null_is_empty() {
        let r = resolver(&[(NODE_SELECTOR_ENV_VAR, "null")]);
        assert!(r.resolve_node_selector().unwrap().is_empty());
    }

    #[test]
    fn test_node_selector_non_string_values_are_fatal() {
        let r = resolver(&[(NODE_SELECTOR_ENV_VAR, r#"{"zone": 1}"#)]);
        let err = r.resolve_node_selector().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson { .. }));
    }

    #[test]
    fn test_node_toleration_object_instead_of_array_is_fatal() {
        let r = resolver(&[(NODE_TOLERATION_ENV_VAR, r#"{"key": "a"}"#)]);
        let err = r.resolve_node_toleration().unwrap_err();
        assert_eq!(err.variable(), NODE_TOLERATION_ENV_VAR);
    }

    #[test]
    fn test_string_or_default_empty_uses_default() {
        let r = resolver(&[("EMPTY_VAR", "")]);
        assert_eq!(r.resolve_string_or_default("EMPTY_VAR", "bar"), "bar");
    }

    #[test]
    fn test_bool_literals() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool_literal(raw), Some(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool_literal(raw), Some(false), "{raw}");
        }
        for raw in ["", "yes", "tRUE", " true", "2"] {
            assert_eq!(parse_bool_literal(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_bool_or_default_unparseable_returns_callers_default() {
        let r = resolver(&[("FLAG", "maybe")]);
        assert!(r.resolve_bool_or_default("FLAG", true));
        assert!(!r.resolve_bool_or_default("FLAG", false));
    }
}
