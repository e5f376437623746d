//! Read-only inspection of ordering-sensitive node-group fields
//!
//! Canonicalization deliberately leaves the lists nested inside a node group
//! in user order. The inspector pulls those lists out by node-group name so
//! callers (the `inspect` command, round-trip tests) can check that nothing
//! was reordered or dropped on the way through the store.

use std::fmt;
use std::str::FromStr;

use crate::crd::{EksClusterConfig, NodePool, Taint};
use crate::Error;

/// Which node-group collection to search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolKind {
    /// `nodeGroups`
    SelfManaged,
    /// `managedNodeGroups`
    Managed,
}

impl PoolKind {
    /// Prefix used in report lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::SelfManaged => "node",
            Self::Managed => "managed",
        }
    }
}

/// Selects one node group by collection and exact name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupSelector<'a> {
    pub kind: PoolKind,
    pub name: &'a str,
}

impl<'a> GroupSelector<'a> {
    pub fn self_managed(name: &'a str) -> Self {
        Self {
            kind: PoolKind::SelfManaged,
            name,
        }
    }

    pub fn managed(name: &'a str) -> Self {
        Self {
            kind: PoolKind::Managed,
            name,
        }
    }
}

/// Ordering-sensitive field of a node group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// Rendered as `key|effect|value`
    Taints,
    AttachIds,
    InstanceTypes,
    SuspendProcesses,
    ClassicLoadBalancers,
    TargetGroups,
}

impl Field {
    /// Every field, in report order
    pub const ALL: [Field; 6] = [
        Field::Taints,
        Field::AttachIds,
        Field::InstanceTypes,
        Field::SuspendProcesses,
        Field::ClassicLoadBalancers,
        Field::TargetGroups,
    ];

    /// Returns true if node groups of `kind` carry this field
    pub fn applies_to(&self, kind: PoolKind) -> bool {
        match self {
            Self::ClassicLoadBalancers | Self::TargetGroups => kind == PoolKind::SelfManaged,
            _ => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Taints => "taints",
            Self::AttachIds => "attach-ids",
            Self::InstanceTypes => "instance-types",
            Self::SuspendProcesses => "suspend-processes",
            Self::ClassicLoadBalancers => "classic-lbs",
            Self::TargetGroups => "target-groups",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<_> = Field::ALL.iter().map(Field::as_str).collect();
                Error::validation(format!(
                    "invalid field: {s}, expected one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Lazily-rendered values of one field.
///
/// Finite, and restartable by cloning before iteration.
#[derive(Clone, Debug)]
pub enum FieldValues<'a> {
    /// No matching node group, or the field is absent
    Empty,
    Taints(std::slice::Iter<'a, Taint>),
    Strings(std::slice::Iter<'a, String>),
}

impl Iterator for FieldValues<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Taints(iter) => iter.next().map(Taint::render),
            Self::Strings(iter) => iter.next().cloned(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Empty => (0, Some(0)),
            Self::Taints(iter) => iter.size_hint(),
            Self::Strings(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for FieldValues<'_> {}

/// Values of `field` for a single node pool
pub fn pool_values<P: NodePool>(pool: &P, field: Field) -> FieldValues<'_> {
    let strings = match field {
        Field::Taints => return FieldValues::Taints(pool.taints().iter()),
        Field::AttachIds => pool.attach_ids(),
        Field::InstanceTypes => pool.instance_types(),
        Field::SuspendProcesses => pool.suspend_processes(),
        Field::ClassicLoadBalancers => pool.classic_load_balancers(),
        Field::TargetGroups => pool.target_group_arns(),
    };
    FieldValues::Strings(strings.iter())
}

/// Extract `field` from the first node group matching `group`.
///
/// No matching group yields an empty sequence rather than an error.
pub fn extract<'a>(
    config: &'a EksClusterConfig,
    group: GroupSelector<'_>,
    field: Field,
) -> FieldValues<'a> {
    match group.kind {
        PoolKind::SelfManaged => config
            .self_managed()
            .find(|ng| ng.name == group.name)
            .map_or(FieldValues::Empty, |ng| pool_values(ng, field)),
        PoolKind::Managed => config
            .managed()
            .find(|ng| ng.name == group.name)
            .map_or(FieldValues::Empty, |ng| pool_values(ng, field)),
    }
}

/// Filters for [`report`]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportFilter<'a> {
    /// Only report this node group
    pub group: Option<&'a str>,
    /// Only report this field
    pub field: Option<Field>,
}

/// Render a line-oriented order report for `config`.
///
/// The first two lines list managed and self-managed group names in
/// document order (`managed=a,b`, `nodes=c,d`). Each following line holds
/// one field of one group: `managed.<group>.<field>=v1,v2`.
pub fn report(config: &EksClusterConfig, filter: ReportFilter<'_>) -> Vec<String> {
    let managed: Vec<&str> = config.managed().map(|ng| ng.name.as_str()).collect();
    let nodes: Vec<&str> = config.self_managed().map(|ng| ng.name.as_str()).collect();

    let mut lines = vec![
        format!("managed={}", managed.join(",")),
        format!("nodes={}", nodes.join(",")),
    ];
    push_pool_lines(&mut lines, PoolKind::Managed, config.managed(), filter);
    push_pool_lines(&mut lines, PoolKind::SelfManaged, config.self_managed(), filter);
    lines
}

fn push_pool_lines<'a, P, I>(
    lines: &mut Vec<String>,
    kind: PoolKind,
    pools: I,
    filter: ReportFilter<'_>,
) where
    P: NodePool + 'a,
    I: Iterator<Item = &'a P>,
{
    let mut matched = false;
    for pool in pools {
        if let Some(name) = filter.group {
            // first match only, same as `extract`
            if matched || pool.name() != name {
                continue;
            }
            matched = true;
        }
        for field in Field::ALL {
            if !field.applies_to(kind) || filter.field.is_some_and(|f| f != field) {
                continue;
            }
            let values: Vec<String> = pool_values(pool, field).collect();
            lines.push(format!(
                "{}.{}.{}={}",
                kind.label(),
                pool.name(),
                field,
                values.join(",")
            ));
        }
    }
}
