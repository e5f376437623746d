//! Canonical ordering of cluster configurations
//!
//! Users submit node groups in arbitrary order. Sorting both node-group
//! collections by name makes two configurations that differ only in that
//! order serialize identically, so a re-apply of the same content never
//! shows up as drift.
//!
//! Only node-group order is rewritten. Lists nested inside a node group
//! (taints, attach IDs, instance types, suspend processes, load balancers,
//! target groups) keep the order the user gave them; see [`crate::inspect`]
//! for how that order is checked.

use crate::crd::{pool_name, EksClusterConfig, NodePool};

/// Rewrite `config` into canonical order, in place.
///
/// Both node-group collections are stable-sorted by name using byte
/// order. Absent (`null`) entries and unnamed groups sort as the empty
/// string, so they come first. No element is added, removed or renamed.
pub fn normalize(config: &mut EksClusterConfig) {
    sort_pools(&mut config.node_groups);
    sort_pools(&mut config.managed_node_groups);
}

/// Returns true if `config` is already in canonical order
pub fn is_canonical(config: &EksClusterConfig) -> bool {
    is_sorted(&config.node_groups) && is_sorted(&config.managed_node_groups)
}

fn sort_pools<P: NodePool>(pools: &mut [Option<P>]) {
    if pools.is_empty() {
        return;
    }
    // slice::sort_by is stable, so equal names keep their submitted order
    pools.sort_by(|a, b| pool_name(a).cmp(pool_name(b)));
}

fn is_sorted<P: NodePool>(pools: &[Option<P>]) -> bool {
    pools
        .windows(2)
        .all(|pair| pool_name(&pair[0]) <= pool_name(&pair[1]))
}
