use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structure record as received from the API: carries a parent reference
/// but no nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatNode {
    pub structure_node_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Advisory only, never recomputed from the actual depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Any other attributes on the record (timestamps, foreign keys)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_active() -> bool {
    true
}

impl FlatNode {
    pub fn new(id: impl Into<String>, parent_id: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            structure_node_id: id.into(),
            parent_id: parent_id.map(str::to_string),
            name: name.into(),
            description: None,
            level: None,
            is_active: true,
            extra: Map::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A structure record with its owned, ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub structure_node_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Fresh tree-form copy of a flat record, with no children yet
    pub fn from_flat(flat: &FlatNode) -> Self {
        Self {
            structure_node_id: flat.structure_node_id.clone(),
            parent_id: flat.parent_id.clone(),
            name: flat.name.clone(),
            description: flat.description.clone(),
            level: flat.level,
            is_active: flat.is_active,
            extra: own_attributes(&flat.extra),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.structure_node_id
    }
}

/// Extra attributes minus any stray `children` key, which the tree form owns
fn own_attributes(extra: &Map<String, Value>) -> Map<String, Value> {
    let mut extra = extra.clone();
    extra.remove("children");
    extra
}

// Tear down child lists one level at a time so a long chain cannot blow the stack
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
