//! Property tests for canonical node-group ordering

use eks_local_common::canonical::{is_canonical, normalize};
use eks_local_common::codec::{decode_documents, encode_documents};
use eks_local_common::crd::{
    EksCluster, EksClusterConfig, ManagedNodeGroup, NodeGroup, NodeGroupSecurityGroups, Taint,
};
use proptest::prelude::*;

// Absent entries and named groups only. An unnamed group would tie with an
// absent entry on sort key while comparing unequal, which makes the result
// depend on submission order.
fn slot_names() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(
        prop_oneof![
            1 => Just(None),
            6 => "[a-dA-D_][a-d0-9-]{0,3}".prop_map(Some),
        ],
        0..10,
    )
}

// Nested content is derived from the name so groups with equal names are equal.
fn self_managed(name: &str) -> NodeGroup {
    NodeGroup {
        instance_type: Some("m5.large".into()),
        taints: vec![
            Taint::new("z", name, "NoSchedule"),
            Taint::new("a", name, "NoExecute"),
        ],
        security_groups: Some(NodeGroupSecurityGroups {
            attach_ids: vec![format!("sg-{name}-2"), format!("sg-{name}-1")],
            ..Default::default()
        }),
        asg_suspend_processes: vec!["Terminate".into(), "AZRebalance".into()],
        ..NodeGroup::named(name)
    }
}

fn managed(name: &str) -> ManagedNodeGroup {
    ManagedNodeGroup {
        instance_types: vec!["t3.large".into(), format!("{name}.medium")],
        ..ManagedNodeGroup::named(name)
    }
}

fn build(nodes: &[Option<String>], managed_names: &[Option<String>]) -> EksClusterConfig {
    EksClusterConfig {
        kind: Some("ClusterConfig".into()),
        node_groups: nodes
            .iter()
            .map(|slot| slot.as_deref().map(self_managed))
            .collect(),
        managed_node_groups: managed_names
            .iter()
            .map(|slot| slot.as_deref().map(managed))
            .collect(),
        ..Default::default()
    }
}

fn names_with_permutation() -> impl Strategy<Value = (Vec<Option<String>>, Vec<Option<String>>)> {
    slot_names().prop_flat_map(|names| (Just(names.clone()), Just(names).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn normalize_is_idempotent(nodes in slot_names(), managed_names in slot_names()) {
        let mut config = build(&nodes, &managed_names);
        normalize(&mut config);
        let once = config.clone();
        normalize(&mut config);

        prop_assert_eq!(&config, &once);
        prop_assert!(is_canonical(&config));
    }

    #[test]
    fn normalize_ignores_submission_order(
        (nodes, nodes_shuffled) in names_with_permutation(),
        (managed_names, managed_shuffled) in names_with_permutation(),
    ) {
        let mut original = build(&nodes, &managed_names);
        let mut permuted = build(&nodes_shuffled, &managed_shuffled);

        normalize(&mut original);
        normalize(&mut permuted);

        prop_assert_eq!(original, permuted);
    }

    #[test]
    fn normalize_keeps_every_entry(nodes in slot_names(), managed_names in slot_names()) {
        let before = build(&nodes, &managed_names);
        let mut after = before.clone();
        normalize(&mut after);

        prop_assert_eq!(after.node_groups.len(), before.node_groups.len());
        prop_assert_eq!(after.managed_node_groups.len(), before.managed_node_groups.len());
        for slot in &before.node_groups {
            prop_assert!(after.node_groups.contains(slot));
        }
        for slot in &before.managed_node_groups {
            prop_assert!(after.managed_node_groups.contains(slot));
        }
    }

    #[test]
    fn canonical_config_survives_document_round_trip(
        (nodes, nodes_shuffled) in names_with_permutation(),
    ) {
        let cluster = EksCluster::new("c1", "p1");
        let mut expected = build(&nodes, &[]);
        normalize(&mut expected);

        let mut submitted = build(&nodes_shuffled, &[]);
        normalize(&mut submitted);
        let encoded = encode_documents(&cluster, &submitted).unwrap();
        let (decoded_cluster, decoded) = decode_documents(&encoded).unwrap();

        prop_assert_eq!(decoded_cluster, cluster);
        prop_assert_eq!(decoded, expected);
    }
}
