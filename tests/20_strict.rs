mod common;

use common::node;
use structure_tree::hierarchy::{
    diagnose, parse_order, try_build_tree, DanglingPolicy, DiagnosticKind, HierarchyBuilder,
    HierarchyError,
};

#[test]
fn strict_build_accepts_well_formed_input() {
    let forest = try_build_tree(&[node("1", None), node("2", Some("1"))]).unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children.len(), 1);
}

#[test]
fn strict_build_rejects_duplicates() {
    let err = try_build_tree(&[node("1", None), node("1", None)]).unwrap_err();
    assert_eq!(err, HierarchyError::DuplicateId { node_id: "1".into(), count: 2 });
}

#[test]
fn strict_build_rejects_cycles_instead_of_looping() {
    let err = try_build_tree(&[node("root", None), node("a", Some("b")), node("b", Some("a"))])
        .unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::CyclicParent);
    assert_eq!(err.node_ids(), vec!["a", "b"]);
}

#[test]
fn diagnose_lists_everything() {
    let problems = diagnose(&[
        node("1", None),
        node("1", None),
        node("2", Some("ghost")),
        node("3", Some("ghost")),
        node("x", Some("y")),
        node("y", Some("x")),
    ]);

    let codes: Vec<&str> = problems.iter().map(|p| p.kind().code()).collect();
    assert_eq!(
        codes,
        vec!["DUPLICATE_ID", "DANGLING_PARENT", "DANGLING_PARENT", "CYCLIC_PARENT"]
    );
    assert_eq!(problems[2].node_ids(), vec!["3"]);
}

#[test]
fn promote_turns_orphan_into_root() {
    let forest = HierarchyBuilder::new()
        .dangling(DanglingPolicy::Promote)
        .build(&[node("2", Some("missing"))])
        .unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id(), "2");
}

#[test]
fn strict_wins_over_promote() {
    let result = HierarchyBuilder::new()
        .dangling(DanglingPolicy::Promote)
        .strict(true)
        .build(&[node("2", Some("missing"))]);
    assert!(matches!(result, Err(HierarchyError::DanglingParent { .. })));
}

#[test]
fn ordering_is_opt_in() {
    let nodes = vec![node("b", None), node("a", None)];

    let unordered = HierarchyBuilder::new().build(&nodes).unwrap();
    assert_eq!(unordered[0].id(), "b");

    let ordered = HierarchyBuilder::new()
        .order(parse_order("id").unwrap())
        .build(&nodes)
        .unwrap();
    assert_eq!(ordered[0].id(), "a");
}
