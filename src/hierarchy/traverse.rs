use serde::Serialize;

use super::node::TreeNode;
use super::order::{compare_nodes, OrderInfo};

/// One row of a pre-order listing of a forest
#[derive(Debug, Clone, Serialize)]
pub struct FlatEntry<'a> {
    pub depth: usize,
    #[serde(flatten)]
    pub node: &'a TreeNode,
}

/// Stable-sort every sibling list in the forest, at every depth.
pub fn sort_forest(forest: &mut [TreeNode], order: &[OrderInfo]) {
    if order.is_empty() {
        return;
    }
    let mut stack: Vec<&mut [TreeNode]> = vec![forest];
    while let Some(siblings) = stack.pop() {
        siblings.sort_by(|a, b| compare_nodes(order, a, b));
        for node in siblings {
            stack.push(node.children.as_mut_slice());
        }
    }
}

/// Pre-order visit; roots have depth 0.
pub fn walk<'a, F>(forest: &'a [TreeNode], mut visit: F)
where
    F: FnMut(&'a TreeNode, usize),
{
    let mut stack: Vec<(&'a TreeNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        visit(node, depth);
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }
}

pub fn flatten(forest: &[TreeNode]) -> Vec<FlatEntry<'_>> {
    let mut out = Vec::new();
    walk(forest, |node, depth| out.push(FlatEntry { depth, node }));
    out
}

pub fn count_nodes(forest: &[TreeNode]) -> usize {
    let mut count = 0;
    walk(forest, |_, _| count += 1);
    count
}

/// Number of levels in the deepest tree; 0 for an empty forest.
pub fn max_depth(forest: &[TreeNode]) -> usize {
    let mut deepest = 0;
    walk(forest, |_, depth| deepest = deepest.max(depth + 1));
    deepest
}

pub fn find<'a>(forest: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    let mut found = None;
    walk(forest, |node, _| {
        if found.is_none() && node.structure_node_id == id {
            found = Some(node);
        }
    });
    found
}

/// Ids from the root down to `id`, inclusive
pub fn path_to(forest: &[TreeNode], id: &str) -> Option<Vec<String>> {
    let mut path: Vec<String> = Vec::new();
    let mut found = false;
    walk(forest, |node, depth| {
        if found {
            return;
        }
        path.truncate(depth);
        path.push(node.structure_node_id.clone());
        if node.structure_node_id == id {
            found = true;
        }
    });
    found.then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::builder::build_tree;
    use crate::hierarchy::node::FlatNode;
    use crate::hierarchy::order::parse_order;

    fn sample() -> Vec<TreeNode> {
        build_tree(&[
            FlatNode::new("1", None, "Headquarters"),
            FlatNode::new("2", Some("1"), "West"),
            FlatNode::new("3", Some("1"), "East"),
            FlatNode::new("4", Some("3"), "East Depot"),
            FlatNode::new("5", None, "Academy"),
        ])
    }

    #[test]
    fn flatten_is_pre_order_with_depth() {
        let forest = sample();
        let entries = flatten(&forest);
        let rows: Vec<(usize, &str)> = entries
            .iter()
            .map(|e| (e.depth, e.node.id()))
            .collect();
        assert_eq!(rows, vec![(0, "1"), (1, "2"), (1, "3"), (2, "4"), (0, "5")]);
    }

    #[test]
    fn counts_and_depth() {
        let forest = sample();
        assert_eq!(count_nodes(&forest), 5);
        assert_eq!(max_depth(&forest), 3);
        assert_eq!(max_depth(&[]), 0);
    }

    #[test]
    fn sort_applies_at_every_level() {
        let mut forest = sample();
        sort_forest(&mut forest, &parse_order("name asc").unwrap());
        assert_eq!(forest[0].name, "Academy");
        assert_eq!(forest[1].children[0].name, "East");
        assert_eq!(forest[1].children[1].name, "West");
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut forest = build_tree(&[
            FlatNode::new("b", None, "Same"),
            FlatNode::new("a", None, "Same"),
        ]);
        sort_forest(&mut forest, &parse_order("name").unwrap());
        assert_eq!(forest[0].id(), "b");
        assert_eq!(forest[1].id(), "a");
    }

    #[test]
    fn find_and_path() {
        let forest = sample();
        assert_eq!(find(&forest, "4").map(|n| n.name.as_str()), Some("East Depot"));
        assert!(find(&forest, "9").is_none());
        assert_eq!(
            path_to(&forest, "4"),
            Some(vec!["1".to_string(), "3".to_string(), "4".to_string()])
        );
        assert_eq!(path_to(&forest, "5"), Some(vec!["5".to_string()]));
        assert_eq!(path_to(&forest, "9"), None);
    }
}
