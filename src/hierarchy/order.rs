use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::node::TreeNode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Unknown sort field: {0}")]
    UnknownField(String),

    #[error("Invalid sort direction '{direction}' for field '{field}'")]
    InvalidDirection { field: String, direction: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    Name,
    Description,
    Level,
    IsActive,
}

impl SortField {
    fn parse(s: &str) -> Result<Self, OrderError> {
        match s.to_ascii_lowercase().as_str() {
            "id" | "structure_node_id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "description" => Ok(SortField::Description),
            "level" => Ok(SortField::Level),
            "is_active" | "active" => Ok(SortField::IsActive),
            _ => Err(OrderError::UnknownField(s.to_string())),
        }
    }

    fn compare(&self, a: &TreeNode, b: &TreeNode) -> Ordering {
        match self {
            SortField::Id => a.structure_node_id.cmp(&b.structure_node_id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Level => a.level.cmp(&b.level),
            SortField::IsActive => a.is_active.cmp(&b.is_active),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub field: SortField,
    pub sort: SortDirection,
}

impl OrderInfo {
    pub fn compare(&self, a: &TreeNode, b: &TreeNode) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.sort {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Parse an order string like `"name asc, level desc"`.
///
/// Direction defaults to ascending. Empty segments are skipped.
pub fn parse_order(s: &str) -> Result<Vec<OrderInfo>, OrderError> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut it = trimmed.split_whitespace();
        if let Some(col) = it.next() {
            let field = SortField::parse(col)?;
            let sort = match it.next() {
                None => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(dir) => {
                    return Err(OrderError::InvalidDirection {
                        field: col.to_string(),
                        direction: dir.to_string(),
                    })
                }
            };
            out.push(OrderInfo { field, sort });
        }
    }
    Ok(out)
}

/// Compare two nodes by each key in turn
pub fn compare_nodes(order: &[OrderInfo], a: &TreeNode, b: &TreeNode) -> Ordering {
    order
        .iter()
        .map(|o| o.compare(a, b))
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
