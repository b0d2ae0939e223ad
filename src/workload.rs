//! # Workload Conversion
//!
//! Converts resolved configuration into the `k8s-openapi` types the DaemonSet
//! builder consumes. Only field mapping happens here; resource quantities are
//! passed through and validated by the API server.

use crate::config::{CachingResources, ResolvedConfig, TolerationRecord};
use k8s_openapi::api::core::v1::{Container, ResourceRequirements, Toleration};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

/// Convert toleration records, preserving order; empty fields are omitted
pub fn tolerations(records: &[TolerationRecord]) -> Vec<Toleration> {
    records
        .iter()
        .map(|record| Toleration {
            key: non_empty(&record.key),
            operator: non_empty(&record.operator),
            value: non_empty(&record.value),
            effect: non_empty(&record.effect),
            toleration_seconds: None,
        })
        .collect()
}

/// Requests and limits for a caching container
pub fn resource_requirements(resources: &CachingResources) -> ResourceRequirements {
    ResourceRequirements {
        requests: Some(BTreeMap::from([
            ("memory".to_string(), Quantity(resources.memory_request.clone())),
            ("cpu".to_string(), Quantity(resources.cpu_request.clone())),
        ])),
        limits: Some(BTreeMap::from([
            ("memory".to_string(), Quantity(resources.memory_limit.clone())),
            ("cpu".to_string(), Quantity(resources.cpu_limit.clone())),
        ])),
        ..ResourceRequirements::default()
    }
}

/// Node selector for the pod spec; `None` when no labels are configured
pub fn node_selector(config: &ResolvedConfig) -> Option<BTreeMap<String, String>> {
    (!config.node_selector.is_empty()).then(|| config.node_selector.clone())
}

/// One container per configured image, ordered by alias
pub fn image_containers(config: &ResolvedConfig) -> Vec<Container> {
    let resources = resource_requirements(&config.resources);
    config
        .images
        .iter()
        .map(|(alias, reference)| Container {
            name: alias.clone(),
            image: Some(reference.clone()),
            resources: Some(resources.clone()),
            ..Container::default()
        })
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
