//! Cluster configuration document
//!
//! The second document of an apply input: the operational shape of the
//! cluster. Only the two node-group collections take part in
//! canonicalization; everything else is carried through unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::node_group::{ManagedNodeGroup, NodeGroup};
use super::{null_as_default, ExtraFields};

/// Cluster configuration descriptor
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EksClusterConfig {
    /// API version of the document, e.g. `rafay.io/v1alpha5`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apiversion: Option<String>,

    /// Document kind, normally `ClusterConfig`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Cluster name, region and Kubernetes version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigMetadata>,

    /// Service network settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes_network_config: Option<KubernetesNetworkConfig>,

    /// Cluster-level IAM bindings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam: Option<ClusterIam>,

    /// Network topology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<ClusterVpc>,

    /// EKS managed addons
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub addons: Vec<Addon>,

    /// Fully-private cluster settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_cluster: Option<PrivateCluster>,

    /// Self-managed node groups. Entries may be `null`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub node_groups: Vec<Option<NodeGroup>>,

    /// Managed node groups. Entries may be `null`.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub managed_node_groups: Vec<Option<ManagedNodeGroup>>,

    /// Availability zones for the control plane
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub availability_zones: Vec<String>,

    /// Control plane logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_watch: Option<ClusterCloudWatch>,

    /// KMS envelope encryption of secrets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets_encryption: Option<SecretsEncryption>,

    /// Keys this model does not name, carried through unchanged
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl EksClusterConfig {
    /// Self-managed node groups that are present, in document order
    pub fn self_managed(&self) -> impl Iterator<Item = &NodeGroup> + Clone {
        self.node_groups.iter().flatten()
    }

    /// Managed node groups that are present, in document order
    pub fn managed(&self) -> impl Iterator<Item = &ManagedNodeGroup> + Clone {
        self.managed_node_groups.iter().flatten()
    }
}

/// Configuration metadata
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ConfigMetadata {
    /// Cluster name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// AWS region
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,

    /// Kubernetes version
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KubernetesNetworkConfig {
    /// CIDR block for Kubernetes service addresses
    #[serde(
        rename = "serviceIPv4CIDR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_ipv4_cidr: Option<String>,
}

/// Cluster-level IAM settings
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterIam {
    /// Existing control plane service role
    #[serde(
        rename = "serviceRoleARN",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_role_permissions_boundary: Option<String>,

    /// Create an OIDC identity provider for IRSA
    #[serde(rename = "withOIDC", default, skip_serializing_if = "Option::is_none")]
    pub with_oidc: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_resource_controller_policy: Option<bool>,

    /// Keys this model does not name, carried through unchanged
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// VPC topology
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterVpc {
    /// Existing VPC ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// VPC CIDR block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,

    /// Control plane security group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group: Option<String>,

    /// Subnets keyed by availability zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnets: Option<ClusterSubnets>,

    #[serde(
        rename = "extraCIDRs",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub extra_cidrs: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_node_security_group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat: Option<ClusterNat>,

    /// API server endpoint access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_endpoints: Option<ClusterEndpoints>,

    /// CIDR blocks allowed to reach the public API endpoint
    #[serde(
        rename = "publicAccessCIDRs",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub public_access_cidrs: Vec<String>,
}

/// Private and public subnets keyed by availability zone
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ClusterSubnets {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub private: BTreeMap<String, SubnetSpec>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub public: BTreeMap<String, SubnetSpec>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SubnetSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Availability zone, may be omitted when the map key is the zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ClusterNat {
    /// `Single`, `HighlyAvailable` or `Disable`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterEndpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_access: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_access: Option<bool>,
}

/// EKS managed addon
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(
        rename = "serviceAccountRoleARN",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_account_role_arn: Option<String>,

    #[serde(
        rename = "attachPolicyARNs",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attach_policy_arns: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrivateCluster {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub skip_endpoint_creation: bool,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub additional_endpoint_services: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCloudWatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_logging: Option<ClusterLogging>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterLogging {
    /// Control plane log types, e.g. `api`, `audit`
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enable_types: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SecretsEncryption {
    /// KMS key used for envelope encryption
    #[serde(rename = "keyARN", default, skip_serializing_if = "Option::is_none")]
    pub key_arn: Option<String>,
}
