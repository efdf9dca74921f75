use std::collections::HashMap;

use super::error::{HierarchyError, HierarchyResult};
use super::node::FlatNode;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Collect every structural problem in a flat collection.
///
/// Problems are reported grouped by kind: duplicate ids first, then dangling
/// parents, then cycles. Within a group, input order decides.
pub fn diagnose(nodes: &[FlatNode]) -> Vec<HierarchyError> {
    let mut issues = Vec::new();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for node in nodes {
        let count = counts.entry(node.structure_node_id.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(node.structure_node_id.as_str());
        }
        *count += 1;
    }
    for id in &first_seen {
        let count = counts[id];
        if count > 1 {
            issues.push(HierarchyError::DuplicateId {
                node_id: id.to_string(),
                count,
            });
        }
    }

    for node in nodes {
        if let Some(parent_id) = &node.parent_id {
            if !counts.contains_key(parent_id.as_str()) {
                issues.push(HierarchyError::DanglingParent {
                    node_id: node.structure_node_id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
        }
    }

    issues.extend(find_cycles(nodes).into_iter().map(|cycle| HierarchyError::CyclicParent { cycle }));

    issues
}

/// First problem found, if any
pub fn validate(nodes: &[FlatNode]) -> HierarchyResult<()> {
    match diagnose(nodes).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Walk every ancestor chain once, reporting each loop a single time.
///
/// Duplicate ids resolve to their last record, matching the builder.
fn find_cycles(nodes: &[FlatNode]) -> Vec<Vec<String>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        index.insert(node.structure_node_id.as_str(), i);
    }

    let parent_of = |i: usize| -> Option<usize> {
        nodes[i]
            .parent_id
            .as_deref()
            .and_then(|p| index.get(p).copied())
    };

    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut cycles = Vec::new();

    for start in 0..nodes.len() {
        // Shadowed duplicates never take part in the hierarchy
        if index.get(nodes[start].structure_node_id.as_str()) != Some(&start) {
            continue;
        }
        if marks[start] != Mark::Unvisited {
            continue;
        }

        let mut path: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match marks[i] {
                Mark::Done => break,
                Mark::Visiting => {
                    if let Some(pos) = path.iter().position(|&p| p == i) {
                        cycles.push(
                            path[pos..]
                                .iter()
                                .map(|&p| nodes[p].structure_node_id.clone())
                                .collect(),
                        );
                    }
                    break;
                }
                Mark::Unvisited => {
                    marks[i] = Mark::Visiting;
                    path.push(i);
                    current = parent_of(i);
                }
            }
        }

        for i in path {
            marks[i] = Mark::Done;
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>) -> FlatNode {
        FlatNode::new(id, parent, format!("Node {}", id))
    }

    #[test]
    fn clean_input_has_no_issues() {
        let nodes = vec![node("1", None), node("2", Some("1")), node("3", Some("2"))];
        assert!(diagnose(&nodes).is_empty());
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn reports_duplicate_once_with_count() {
        let nodes = vec![node("1", None), node("1", None), node("1", None)];
        assert_eq!(
            diagnose(&nodes),
            vec![HierarchyError::DuplicateId { node_id: "1".into(), count: 3 }]
        );
    }

    #[test]
    fn reports_dangling_parent() {
        let nodes = vec![node("2", Some("missing"))];
        assert_eq!(
            validate(&nodes),
            Err(HierarchyError::DanglingParent {
                node_id: "2".into(),
                parent_id: "missing".into()
            })
        );
    }

    #[test]
    fn reports_two_node_cycle_once() {
        let nodes = vec![node("a", Some("b")), node("b", Some("a")), node("c", Some("a"))];
        assert_eq!(
            diagnose(&nodes),
            vec![HierarchyError::CyclicParent { cycle: vec!["a".into(), "b".into()] }]
        );
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let nodes = vec![node("x", Some("x"))];
        assert_eq!(
            diagnose(&nodes),
            vec![HierarchyError::CyclicParent { cycle: vec!["x".into()] }]
        );
    }

    #[test]
    fn tail_into_cycle_reports_only_the_loop() {
        let nodes = vec![
            node("t", Some("p")),
            node("p", Some("q")),
            node("q", Some("r")),
            node("r", Some("p")),
        ];
        assert_eq!(
            diagnose(&nodes),
            vec![HierarchyError::CyclicParent {
                cycle: vec!["p".into(), "q".into(), "r".into()]
            }]
        );
    }

    #[test]
    fn groups_issues_by_kind() {
        let nodes = vec![
            node("a", Some("a")),
            node("b", Some("gone")),
            node("c", None),
            node("c", None),
        ];
        let kinds: Vec<_> = diagnose(&nodes).iter().map(|e| e.kind().code()).collect();
        assert_eq!(kinds, vec!["DUPLICATE_ID", "DANGLING_PARENT", "CYCLIC_PARENT"]);
    }
}
