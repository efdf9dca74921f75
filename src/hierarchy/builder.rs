use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::HierarchyResult;
use super::node::{FlatNode, TreeNode};
use super::order::OrderInfo;
use super::traverse::sort_forest;
use super::validate::validate;

/// What to do with a node whose `parent_id` matches no record in the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DanglingPolicy {
    /// Leave the node (and its subtree) out of the forest
    #[default]
    Drop,
    /// Treat the node as an additional root
    Promote,
}

impl std::str::FromStr for DanglingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(DanglingPolicy::Drop),
            "promote" => Ok(DanglingPolicy::Promote),
            other => Err(format!("unknown dangling policy '{}'", other)),
        }
    }
}

/// Build the forest with default settings.
///
/// Never fails: a node with a missing parent is silently left out together
/// with its descendants, nodes on a parent cycle never reach a root and are
/// left out too, and a duplicated id keeps only its last record. Roots and
/// sibling lists follow input order.
pub fn build_tree(nodes: &[FlatNode]) -> Vec<TreeNode> {
    assemble(nodes, DanglingPolicy::Drop)
}

/// Like [`build_tree`] but rejects duplicate ids, dangling parents and cycles.
pub fn try_build_tree(nodes: &[FlatNode]) -> HierarchyResult<Vec<TreeNode>> {
    HierarchyBuilder::new().strict(true).build(nodes)
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    dangling: DanglingPolicy,
    strict: bool,
    order: Vec<OrderInfo>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dangling(mut self, policy: DanglingPolicy) -> Self {
        self.dangling = policy;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sibling ordering applied after linking; empty keeps input order
    pub fn order(mut self, order: Vec<OrderInfo>) -> Self {
        self.order = order;
        self
    }

    pub fn build(&self, nodes: &[FlatNode]) -> HierarchyResult<Vec<TreeNode>> {
        if self.strict {
            validate(nodes)?;
        }

        let mut forest = assemble(nodes, self.dangling);
        sort_forest(&mut forest, &self.order);
        Ok(forest)
    }
}

fn assemble(nodes: &[FlatNode], dangling: DanglingPolicy) -> Vec<TreeNode> {
    let n = nodes.len();

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.structure_node_id.as_str(), i).is_some() {
            warn!(
                node_id = %node.structure_node_id,
                "duplicate structure node id, keeping the last record"
            );
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots: Vec<usize> = Vec::new();
    let mut orphans = 0usize;

    for (i, node) in nodes.iter().enumerate() {
        if index.get(node.structure_node_id.as_str()) != Some(&i) {
            continue;
        }
        match node.parent_id.as_deref() {
            None => roots.push(i),
            Some(parent_id) => match index.get(parent_id) {
                Some(&parent) => children[parent].push(i),
                None => {
                    orphans += 1;
                    match dangling {
                        DanglingPolicy::Drop => debug!(
                            node_id = %node.structure_node_id,
                            parent_id,
                            "dropping node with missing parent"
                        ),
                        DanglingPolicy::Promote => roots.push(i),
                    }
                }
            },
        }
    }

    // Pre-order of everything reachable from a root. Every kept id has a
    // single parent, so this visits each node at most once.
    let mut reachable: Vec<usize> = Vec::with_capacity(index.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(i) = stack.pop() {
        reachable.push(i);
        stack.extend(children[i].iter().rev().copied());
    }

    // Reverse pre-order puts every child before its parent.
    let mut built: Vec<Option<TreeNode>> = (0..n).map(|_| None).collect();
    for &i in reachable.iter().rev() {
        let mut tree = TreeNode::from_flat(&nodes[i]);
        tree.children = children[i]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        built[i] = Some(tree);
    }

    let omitted = index.len() - reachable.len();
    if omitted > 0 {
        warn!(
            omitted,
            orphans,
            policy = ?dangling,
            "some structure nodes are not reachable from any root"
        );
    }
    debug!(
        input = n,
        roots = roots.len(),
        placed = reachable.len(),
        "built structure hierarchy"
    );

    roots.iter().filter_map(|&r| built[r].take()).collect()
}
