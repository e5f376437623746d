//! Node group descriptors
//!
//! Self-managed ([`NodeGroup`]) and managed ([`ManagedNodeGroup`]) node pools
//! share most of their shape. The [`NodePool`] trait exposes the parts that
//! canonicalization and inspection care about, so both kinds are handled by
//! the same code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{null_as_default, ExtraFields};

/// Read access to the ordering-sensitive parts of a node pool
pub trait NodePool {
    /// Pool name, empty when unnamed
    fn name(&self) -> &str;

    fn taints(&self) -> &[Taint];

    /// Security group IDs attached to the pool's instances
    fn attach_ids(&self) -> &[String];

    fn instance_types(&self) -> &[String];

    /// Auto-scaling group processes suspended during updates
    fn suspend_processes(&self) -> &[String];

    /// Classic load balancers the pool registers with (self-managed only)
    fn classic_load_balancers(&self) -> &[String] {
        &[]
    }

    /// Target groups the pool registers with (self-managed only)
    fn target_group_arns(&self) -> &[String] {
        &[]
    }
}

/// Name of a possibly-absent list entry; absent entries sort as unnamed.
pub fn pool_name<P: NodePool>(slot: &Option<P>) -> &str {
    slot.as_ref().map_or("", |pool| pool.name())
}

/// Kubernetes taint applied to every node of a pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Taint {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,

    /// `NoSchedule`, `PreferNoSchedule` or `NoExecute`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub effect: String,
}

impl Taint {
    pub fn new(key: impl Into<String>, value: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            effect: effect.into(),
        }
    }

    /// Render as `key|effect|value`
    pub fn render(&self) -> String {
        format!("{}|{}|{}", self.key, self.effect, self.value)
    }
}

/// Security group settings of a node pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupSecurityGroups {
    /// Additional security groups to attach
    #[serde(
        rename = "attachIDs",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attach_ids: Vec<String>,

    /// Attach the security group shared by all node groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_shared: Option<bool>,

    /// Attach a security group local to this node group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_local: Option<bool>,
}

/// IAM settings of a node pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupIam {
    #[serde(
        rename = "attachPolicyARNs",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attach_policy_arns: Vec<String>,

    #[serde(
        rename = "instanceProfileARN",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instance_profile_arn: Option<String>,

    #[serde(
        rename = "instanceRoleARN",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub instance_role_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_role_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_role_permissions_boundary: Option<String>,

    /// Addon policies keyed by name, e.g. `autoScaler: true`
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub with_addon_policies: BTreeMap<String, bool>,
}

/// SSH access to the nodes of a pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupSsh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// EC2 key pair name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_name: Option<String>,

    #[serde(
        rename = "sourceSecurityGroupIds",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub source_security_group_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_ssm: Option<bool>,
}

/// Spot and on-demand mix for a self-managed pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstancesDistribution {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub instance_types: Vec<String>,

    /// Defaults to the on-demand price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_demand_base_capacity: Option<i64>,

    /// Range 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_demand_percentage_above_base_capacity: Option<i64>,

    /// Range 1-20
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_instance_pools: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_allocation_strategy: Option<String>,

    #[serde(default)]
    pub capacity_rebalance: bool,
}

/// Rolling update limits
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable_percentage: Option<i64>,
}

/// EC2 launch template reference for a managed pool
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LaunchTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Self-managed node group
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroup {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub availability_zones: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subnets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_capacity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub private_networking: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam: Option<NodeGroupIam>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh: Option<NodeGroupSsh>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<NodeGroupSecurityGroups>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods_per_node: Option<i64>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub asg_suspend_processes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances_distribution: Option<InstancesDistribution>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub classic_load_balancer_names: Vec<String>,

    #[serde(
        rename = "targetGroupARNs",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub target_group_arns: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub taints: Vec<Taint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_config: Option<UpdateConfig>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pre_bootstrap_commands: Vec<String>,

    /// Keys this model does not name, carried through unchanged
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl NodeGroup {
    /// Create an otherwise-empty node group with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl NodePool for NodeGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn taints(&self) -> &[Taint] {
        &self.taints
    }

    fn attach_ids(&self) -> &[String] {
        self.security_groups
            .as_ref()
            .map(|sg| sg.attach_ids.as_slice())
            .unwrap_or_default()
    }

    fn instance_types(&self) -> &[String] {
        self.instances_distribution
            .as_ref()
            .map(|d| d.instance_types.as_slice())
            .unwrap_or_default()
    }

    fn suspend_processes(&self) -> &[String] {
        &self.asg_suspend_processes
    }

    fn classic_load_balancers(&self) -> &[String] {
        &self.classic_load_balancer_names
    }

    fn target_group_arns(&self) -> &[String] {
        &self.target_group_arns
    }
}

/// Managed node group
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedNodeGroup {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub availability_zones: Vec<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subnets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_capacity: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub private_networking: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam: Option<NodeGroupIam>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh: Option<NodeGroupSsh>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ami: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<NodeGroupSecurityGroups>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pods_per_node: Option<i64>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub asg_suspend_processes: Vec<String>,

    /// Instance types for a mixed-instances pool
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub instance_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<bool>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub taints: Vec<Taint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_config: Option<UpdateConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_template: Option<LaunchTemplate>,

    /// AMI release version, defaults to the latest for the cluster version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_version: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pre_bootstrap_commands: Vec<String>,

    /// Keys this model does not name, carried through unchanged
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ManagedNodeGroup {
    /// Create an otherwise-empty managed node group with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl NodePool for ManagedNodeGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn taints(&self) -> &[Taint] {
        &self.taints
    }

    fn attach_ids(&self) -> &[String] {
        self.security_groups
            .as_ref()
            .map(|sg| sg.attach_ids.as_slice())
            .unwrap_or_default()
    }

    fn instance_types(&self) -> &[String] {
        &self.instance_types
    }

    fn suspend_processes(&self) -> &[String] {
        &self.asg_suspend_processes
    }
}
