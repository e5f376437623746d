//! Cluster descriptor document
//!
//! The first document of an apply input. It carries the identity of the
//! cluster (name and project) from which the store key is derived.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, ExtraFields};

/// Store key used for descriptors that carry no identity
pub const UNKNOWN_CLUSTER_KEY: &str = "unknown";

/// Derive the store key for a cluster identity.
///
/// `"<project>/<name>"` when a project is set, `"<name>"` otherwise. An
/// empty name has no identity and maps to [`UNKNOWN_CLUSTER_KEY`].
pub fn store_key(project: &str, name: &str) -> String {
    if name.is_empty() {
        return UNKNOWN_CLUSTER_KEY.to_string();
    }
    if project.is_empty() {
        return name.to_string();
    }
    format!("{project}/{name}")
}

/// Cluster descriptor: identity and classification of a managed cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct EksCluster {
    /// Document kind, normally `Cluster`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Cluster identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ClusterMetadata>,

    /// Cluster classification (blueprint, cloud provider, CNI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ClusterSpec>,

    /// Keys this model does not name, carried through unchanged
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl EksCluster {
    /// Create a descriptor with the given identity
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            kind: Some("Cluster".to_string()),
            metadata: Some(ClusterMetadata {
                name: name.into(),
                project: project.into(),
                ..Default::default()
            }),
            spec: None,
            extra: ExtraFields::new(),
        }
    }

    /// Cluster name, empty when the descriptor has no metadata
    pub fn name(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.name.as_str())
    }

    /// Project name, empty when unset
    pub fn project(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.project.as_str())
    }

    /// Key under which this cluster is stored
    pub fn store_key(&self) -> String {
        match &self.metadata {
            Some(meta) => store_key(&meta.project, &meta.name),
            None => UNKNOWN_CLUSTER_KEY.to_string(),
        }
    }
}

/// Cluster identity
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ClusterMetadata {
    /// Cluster name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Project the cluster belongs to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Free-form labels
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
}

/// Cluster classification
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ClusterSpec {
    /// Cluster type, e.g. `eks`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Blueprint applied to the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<String>,

    /// Blueprint version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprintversion: Option<String>,

    /// Name of the cloud credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudprovider: Option<String>,

    /// CNI provider, e.g. `aws-cni`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cniprovider: Option<String>,

    /// Proxy settings for the cluster agents, keyed `labels` in documents
    #[serde(
        rename = "labels",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub proxyconfig: BTreeMap<String, String>,

    /// Keys this model does not name, carried through unchanged
    #[serde(flatten)]
    pub extra: ExtraFields,
}
