use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Duplicate structure node id '{node_id}' ({count} records)")]
    DuplicateId { node_id: String, count: usize },

    #[error("Node '{node_id}' references missing parent '{parent_id}'")]
    DanglingParent { node_id: String, parent_id: String },

    #[error("Cyclic parent chain: {}", .cycle.join(" -> "))]
    CyclicParent { cycle: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    DuplicateId,
    DanglingParent,
    CyclicParent,
}

impl DiagnosticKind {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::DuplicateId => "DUPLICATE_ID",
            DiagnosticKind::DanglingParent => "DANGLING_PARENT",
            DiagnosticKind::CyclicParent => "CYCLIC_PARENT",
        }
    }
}

impl HierarchyError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            HierarchyError::DuplicateId { .. } => DiagnosticKind::DuplicateId,
            HierarchyError::DanglingParent { .. } => DiagnosticKind::DanglingParent,
            HierarchyError::CyclicParent { .. } => DiagnosticKind::CyclicParent,
        }
    }

    /// Ids of the records at fault
    pub fn node_ids(&self) -> Vec<&str> {
        match self {
            HierarchyError::DuplicateId { node_id, .. } => vec![node_id.as_str()],
            HierarchyError::DanglingParent { node_id, .. } => vec![node_id.as_str()],
            HierarchyError::CyclicParent { cycle } => cycle.iter().map(String::as_str).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.kind().code(),
            "message": self.to_string(),
            "node_ids": self.node_ids(),
        })
    }
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;
