//! Cluster and cluster configuration documents
//!
//! The types mirror the eksctl-style documents a user submits: an
//! [`EksCluster`] descriptor followed by an [`EksClusterConfig`]. Every
//! optional nested structure is an `Option`, and node-group lists hold
//! `Option` entries so a `null` list item survives a round-trip.

mod cluster;
mod config;
mod node_group;

pub use cluster::{store_key, ClusterMetadata, ClusterSpec, EksCluster, UNKNOWN_CLUSTER_KEY};
pub use config::{
    Addon, ClusterCloudWatch, ClusterEndpoints, ClusterIam, ClusterLogging, ClusterNat,
    ClusterSubnets, ClusterVpc, ConfigMetadata, EksClusterConfig, KubernetesNetworkConfig,
    PrivateCluster, SecretsEncryption, SubnetSpec,
};
pub use node_group::{
    pool_name, InstancesDistribution, LaunchTemplate, ManagedNodeGroup, NodeGroup,
    NodeGroupIam, NodeGroupSecurityGroups, NodeGroupSsh, NodePool, Taint, UpdateConfig,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Document keys outside the modelled fields. They are kept verbatim so a
/// stored document reads back with everything the user submitted.
pub type ExtraFields = BTreeMap<String, serde_yaml::Value>;

/// Deserialize a field where an explicit `null` means the same as absent.
///
/// Used for lists and maps so `taints:` with no value decodes as empty.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
