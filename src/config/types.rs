//! # Configuration Types
//!
//! The immutable snapshot produced by the resolver and its component records.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Resolved image puller configuration
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Name of the DaemonSet that pulls the images
    pub daemonset_name: String,
    /// Namespace the DaemonSet is created in
    pub namespace: String,
    /// Image alias -> image reference
    pub images: BTreeMap<String, String>,
    /// Hours between caching cycles (always >= 1)
    pub caching_interval_hours: u32,
    /// Resource requests/limits for each caching container
    pub resources: CachingResources,
    /// Node label constraints for the DaemonSet pods
    pub node_selector: BTreeMap<String, String>,
    /// Tolerations applied to the DaemonSet pods, in input order
    pub node_toleration: Vec<TolerationRecord>,
}

impl ResolvedConfig {
    /// Caching interval as a `Duration`
    pub fn caching_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.caching_interval_hours) * 60 * 60)
    }
}

/// Memory and CPU settings for caching containers
///
/// Values are Kubernetes quantity strings passed through verbatim; they are not
/// validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachingResources {
    pub memory_request: String,
    pub memory_limit: String,
    pub cpu_request: String,
    pub cpu_limit: String,
}

/// A single pod toleration decoded from `NODE_TOLERATION`
///
/// Unknown JSON fields are ignored. Missing or `null` fields decode to "".
/// Capitalized field names (`Key`, `Operator`, ...) are accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TolerationRecord {
    #[serde(default, alias = "Key", deserialize_with = "null_as_empty")]
    pub key: String,
    #[serde(default, alias = "Operator", deserialize_with = "null_as_empty")]
    pub operator: String,
    #[serde(default, alias = "Value", deserialize_with = "null_as_empty")]
    pub value: String,
    #[serde(default, alias = "Effect", deserialize_with = "null_as_empty")]
    pub effect: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toleration_missing_fields_default_to_empty() {
        let record: TolerationRecord =
            serde_json::from_str(r#"{"key": "dedicated", "unknown": 42}"#).unwrap();
        assert_eq!(
            record,
            TolerationRecord {
                key: "dedicated".to_string(),
                ..TolerationRecord::default()
            }
        );
    }

    #[test]
    fn test_toleration_null_field_is_empty() {
        let record: TolerationRecord =
            serde_json::from_str(r#"{"key": "gpu", "value": null, "effect": "NoSchedule"}"#)
                .unwrap();
        assert_eq!(record.value, "");
        assert_eq!(record.effect, "NoSchedule");
    }

    #[test]
    fn test_toleration_capitalized_field_names() {
        let record: TolerationRecord = serde_json::from_str(
            r#"{"Key": "gpu", "Operator": "Equal", "Value": "true", "Effect": "NoExecute"}"#,
        )
        .unwrap();
        assert_eq!(
            record,
            TolerationRecord {
                key: "gpu".to_string(),
                operator: "Equal".to_string(),
                value: "true".to_string(),
                effect: "NoExecute".to_string(),
            }
        );
    }

    #[test]
    fn test_toleration_wrong_field_type_fails() {
        let result = serde_json::from_str::<TolerationRecord>(r#"{"key": 5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_caching_interval_duration() {
        let config = ResolvedConfig {
            daemonset_name: "ds".to_string(),
            namespace: "ns".to_string(),
            images: BTreeMap::new(),
            caching_interval_hours: 3,
            resources: CachingResources {
                memory_request: "1Mi".to_string(),
                memory_limit: "5Mi".to_string(),
                cpu_request: ".05".to_string(),
                cpu_limit: ".2".to_string(),
            },
            node_selector: BTreeMap::new(),
            node_toleration: Vec::new(),
        };
        assert_eq!(config.caching_interval(), Duration::from_secs(3 * 3600));
    }
}
