use std::collections::HashSet;

use serde::Serialize;

use crate::cli::utils::{load_nodes, output_data};
use crate::cli::{OutputFormat, SourceArgs};
use crate::config::config;
use crate::hierarchy::traverse::{count_nodes, max_depth};
use crate::hierarchy::{diagnose, DiagnosticKind, FlatNode, HierarchyBuilder};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    pub records: usize,
    pub unique_ids: usize,
    pub roots: usize,
    pub placed: usize,
    pub omitted: usize,
    pub max_depth: usize,
    pub inactive: usize,
    pub duplicate_ids: usize,
    pub dangling_parents: usize,
    pub cycles: usize,
}

impl HierarchyStats {
    pub fn collect(nodes: &[FlatNode], builder: &HierarchyBuilder) -> anyhow::Result<Self> {
        let forest = builder.build(nodes)?;
        let unique_ids = nodes
            .iter()
            .map(|n| n.structure_node_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let placed = count_nodes(&forest);

        let mut stats = Self {
            records: nodes.len(),
            unique_ids,
            roots: forest.len(),
            placed,
            omitted: unique_ids - placed,
            max_depth: max_depth(&forest),
            inactive: nodes.iter().filter(|n| !n.is_active).count(),
            ..Self::default()
        };

        for problem in diagnose(nodes) {
            match problem.kind() {
                DiagnosticKind::DuplicateId => stats.duplicate_ids += 1,
                DiagnosticKind::DanglingParent => stats.dangling_parents += 1,
                DiagnosticKind::CyclicParent => stats.cycles += 1,
            }
        }

        Ok(stats)
    }
}

pub async fn handle(args: SourceArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let nodes = load_nodes(&args).await?;
    let builder = HierarchyBuilder::new().dangling(config().hierarchy.dangling_policy);
    let stats = HierarchyStats::collect(&nodes, &builder)?;

    match output_format {
        OutputFormat::Json => output_data(&stats),
        OutputFormat::Text => {
            println!("Records:          {}", stats.records);
            println!("Unique ids:       {}", stats.unique_ids);
            println!("Roots:            {}", stats.roots);
            println!("Placed in tree:   {}", stats.placed);
            println!("Omitted:          {}", stats.omitted);
            println!("Max depth:        {}", stats.max_depth);
            println!("Inactive:         {}", stats.inactive);
            println!("Duplicate ids:    {}", stats.duplicate_ids);
            println!("Dangling parents: {}", stats.dangling_parents);
            println!("Cycles:           {}", stats.cycles);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_what_was_left_out() {
        let nodes = vec![
            FlatNode::new("1", None, "HQ"),
            FlatNode::new("2", Some("1"), "North"),
            FlatNode::new("3", Some("gone"), "Orphan"),
            FlatNode::new("a", Some("b"), "Loop A"),
            FlatNode::new("b", Some("a"), "Loop B"),
        ];
        let stats = HierarchyStats::collect(&nodes, &HierarchyBuilder::new()).unwrap();

        assert_eq!(stats.records, 5);
        assert_eq!(stats.roots, 1);
        assert_eq!(stats.placed, 2);
        assert_eq!(stats.omitted, 3);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.dangling_parents, 1);
        assert_eq!(stats.cycles, 1);
        assert_eq!(stats.duplicate_ids, 0);
    }
}
