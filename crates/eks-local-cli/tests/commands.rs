//! End-to-end command tests against a scratch store file

use std::path::{Path, PathBuf};

use clap::Parser;
use eks_local_cli::{Cli, Error};
use eks_local_common::canonical::normalize;
use eks_local_common::codec::{decode_documents, read_documents};
use eks_local_common::ClusterStore;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Result<String, Error> {
    let cli = Cli::try_parse_from(std::iter::once("eks-local-backend").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    cli.run_to(&mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn apply_fixture(store: &Path, name: &str) -> String {
    let file = fixture(name);
    run(&["apply", "--file", path_str(&file), "--store", path_str(store)]).unwrap()
}

#[test]
fn story_apply_reorders_node_groups_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    let out = apply_fixture(&store, "cluster.yaml");
    assert_eq!(out, "applied cluster defaultproject/demo\n");

    let yaml = run(&[
        "read",
        "--name",
        "demo",
        "--project",
        "defaultproject",
        "--store",
        path_str(&store),
    ])
    .unwrap();
    let (cluster, config) = decode_documents(&yaml).unwrap();

    assert_eq!(cluster.store_key(), "defaultproject/demo");
    let nodes: Vec<_> = config.self_managed().map(|ng| ng.name.as_str()).collect();
    assert_eq!(nodes, ["a", "b", "c"]);
    let managed: Vec<_> = config.managed().map(|ng| ng.name.as_str()).collect();
    assert_eq!(managed, ["system", "workers"]);
}

#[test]
fn story_read_returns_canonically_equal_config() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    apply_fixture(&store, "cluster.yaml");

    let (submitted_cluster, mut submitted) = read_documents(&fixture("cluster.yaml")).unwrap();
    normalize(&mut submitted);

    let yaml = run(&[
        "read",
        "--name",
        "demo",
        "--project",
        "defaultproject",
        "--store",
        path_str(&store),
    ])
    .unwrap();
    let (cluster, config) = decode_documents(&yaml).unwrap();

    assert_eq!(cluster, submitted_cluster);
    assert_eq!(config, submitted);
    assert!(yaml.contains("fargateProfiles"));
    assert!(yaml.contains("ebsOptimized: true"));
}

#[test]
fn story_cluster_without_project_is_keyed_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    let out = apply_fixture(&store, "cluster-no-project.yaml");
    assert_eq!(out, "applied cluster c1\n");

    let yaml = run(&["read", "--name", "c1", "--store", path_str(&store)]).unwrap();
    assert!(yaml.contains("name: c1"));
}

#[test]
fn story_reapply_replaces_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    apply_fixture(&store, "cluster.yaml");
    apply_fixture(&store, "cluster.yaml");
    apply_fixture(&store, "cluster-no-project.yaml");

    let loaded = ClusterStore::load(&store).unwrap();
    assert_eq!(loaded.keys().collect::<Vec<_>>(), ["c1", "defaultproject/demo"]);
}

#[test]
fn story_read_missing_cluster_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    apply_fixture(&store, "cluster.yaml");
    let before = std::fs::read(&store).unwrap();

    let err = run(&["read", "--name", "ghost", "--project", "p1", "--store", path_str(&store)])
        .unwrap_err();

    assert!(matches!(err, Error::ClusterNotFound { ref key } if key == "p1/ghost"));
    assert_eq!(err.to_string(), "cluster not found: p1/ghost");
    assert_eq!(err.exit_code(), 1);
    assert_eq!(std::fs::read(&store).unwrap(), before);
}

#[test]
fn story_read_from_absent_store_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("absent.json");

    let err = run(&["read", "--name", "c1", "--store", path_str(&store)]).unwrap_err();

    assert!(matches!(err, Error::ClusterNotFound { .. }));
    assert!(!store.exists());
}

#[test]
fn story_failed_apply_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    apply_fixture(&store, "cluster.yaml");
    let before = std::fs::read(&store).unwrap();

    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "kind: Cluster\nmetadata:\n  name: only-one-document\n").unwrap();
    let err = run(&["apply", "--file", path_str(&bad), "--store", path_str(&store)]).unwrap_err();
    assert_eq!(err.exit_code(), 1);

    let missing = dir.path().join("missing.yaml");
    let err = run(&["apply", "--file", path_str(&missing), "--store", path_str(&store)])
        .unwrap_err();
    assert!(matches!(err, Error::Store(ref e) if e.is_io()));

    assert_eq!(std::fs::read(&store).unwrap(), before);
}

#[test]
fn story_corrupt_store_is_a_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    std::fs::write(&store, "{\"clusters\": ").unwrap();

    let err = run(&["read", "--name", "c1", "--store", path_str(&store)]).unwrap_err();

    assert!(matches!(err, Error::Store(ref e) if e.is_decode()));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn story_apply_into_empty_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    std::fs::write(&store, "").unwrap();

    apply_fixture(&store, "cluster-no-project.yaml");

    assert!(ClusterStore::load(&store).unwrap().get("c1").is_some());
}

#[test]
fn story_missing_required_arguments_are_usage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    let err = run(&["apply", "--store", path_str(&store)]).unwrap_err();
    assert_eq!(err.to_string(), "apply requires --file");
    assert_eq!(err.exit_code(), 2);

    // clap refuses an empty path value itself, with the same status
    let err = Cli::try_parse_from(["eks-local-backend", "apply", "--file", ""]).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    let err = run(&["read", "--name", "", "--store", path_str(&store)]).unwrap_err();
    assert_eq!(err.to_string(), "read requires --name");
    assert_eq!(err.exit_code(), 2);

    let err = run(&["inspect", "--store", path_str(&store)]).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    // usage errors happen before any I/O
    assert!(!store.exists());
}

#[test]
fn story_unknown_subcommand_is_rejected_by_parser() {
    let err = Cli::try_parse_from(["eks-local-backend", "delete"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn story_inspect_file_reports_submitted_order() {
    let file = fixture("cluster.yaml");

    let out = run(&["inspect", "--file", path_str(&file), "--group", "a"]).unwrap();

    assert_eq!(
        out,
        "managed=workers,system\n\
         nodes=c,a,b\n\
         node.a.taints=\n\
         node.a.attach-ids=sg-2,sg-1\n\
         node.a.instance-types=\n\
         node.a.suspend-processes=\n\
         node.a.classic-lbs=lb-b,lb-a\n\
         node.a.target-groups=arn:aws:tg/2,arn:aws:tg/1\n"
    );
}

#[test]
fn story_inspect_stored_cluster_keeps_nested_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    apply_fixture(&store, "cluster.yaml");

    let out = run(&[
        "inspect",
        "--name",
        "demo",
        "--project",
        "defaultproject",
        "--store",
        path_str(&store),
        "--field",
        "taints",
    ])
    .unwrap();

    assert_eq!(
        out,
        "managed=system,workers\n\
         nodes=a,b,c\n\
         managed.system.taints=\n\
         managed.workers.taints=\n\
         node.a.taints=\n\
         node.b.taints=\n\
         node.c.taints=dedicated|NoSchedule|c,arch|NoExecute|arm64\n"
    );
}

#[test]
fn story_inspect_rejects_unknown_field() {
    let result = Cli::try_parse_from(["eks-local-backend", "inspect", "--name", "c1", "--field", "labels"]);
    assert!(result.is_err());
}

#[test]
fn story_list_shows_stored_clusters() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");

    let empty = run(&["list", "--store", path_str(&store)]).unwrap();
    assert_eq!(empty, "KEY  NODE GROUPS  MANAGED  UPDATED\n");

    apply_fixture(&store, "cluster.yaml");
    apply_fixture(&store, "cluster-no-project.yaml");
    let out = run(&["list", "--store", path_str(&store)]).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("KEY"));
    let c1: Vec<&str> = lines[1].split_whitespace().collect();
    assert_eq!(c1[..3], ["c1", "2", "0"]);
    let demo: Vec<&str> = lines[2].split_whitespace().collect();
    assert_eq!(demo[..3], ["defaultproject/demo", "3", "2"]);
    assert!(demo[3].ends_with('s'));
}

#[test]
fn story_store_file_is_stable_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    apply_fixture(&store, "cluster-no-project.yaml");

    let text = std::fs::read_to_string(&store).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let record = &value["clusters"]["c1"];

    assert!(text.starts_with("{\n  \"clusters\": {"));
    assert_eq!(record["cluster"]["metadata"]["name"], "c1");
    assert_eq!(record["config"]["nodeGroups"][0]["name"], "y");
    assert!(record["updated_at"].as_str().unwrap().ends_with('Z'));
}
