use serde::Serialize;
use serde_json::{Map, Value};

use crate::hierarchy::{FlatNode, TreeNode};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Width of one nesting step, at least 2
    pub indent: usize,
    /// Leave out inactive nodes together with everything below them
    pub hide_inactive: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            hide_inactive: false,
        }
    }
}

fn label(name: &str, id: &str, is_active: bool) -> String {
    if is_active {
        format!("{} ({})", name, id)
    } else {
        format!("{} ({}) [inactive]", name, id)
    }
}

fn visible(node: &TreeNode, hide_inactive: bool) -> bool {
    !hide_inactive || node.is_active
}

/// Render the forest as a box-drawing tree, one node per line
pub fn render_tree(forest: &[TreeNode], options: &RenderOptions) -> String {
    let width = options.indent.max(2);
    let fill = "─".repeat(width - 2);
    let branch = format!("├{} ", fill);
    let last_branch = format!("└{} ", fill);
    let pipe = format!("│{}", " ".repeat(width - 1));
    let blank = " ".repeat(width);

    let mut out = String::new();
    // (node, prefix for its own line, prefix handed to its children)
    let mut stack: Vec<(&TreeNode, String, String)> = forest
        .iter()
        .filter(|n| visible(n, options.hide_inactive))
        .rev()
        .map(|n| (n, String::new(), String::new()))
        .collect();

    while let Some((node, line_prefix, child_prefix)) = stack.pop() {
        out.push_str(&line_prefix);
        out.push_str(&label(&node.name, &node.structure_node_id, node.is_active));
        out.push('\n');

        let shown: Vec<&TreeNode> = node.children.iter().filter(|c| visible(c, options.hide_inactive)).collect();
        let count = shown.len();
        for (i, child) in shown.into_iter().enumerate().rev() {
            let last = i + 1 == count;
            let connector = if last { &last_branch } else { &branch };
            let continuation = if last { &blank } else { &pipe };
            stack.push((
                child,
                format!("{}{}", child_prefix, connector),
                format!("{}{}", child_prefix, continuation),
            ));
        }
    }

    out
}

/// Everything but `children`, in the shape `TreeNode` serializes to
#[derive(Serialize)]
struct NodeFields<'a> {
    structure_node_id: &'a str,
    parent_id: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<i32>,
    is_active: bool,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

impl<'a> From<&'a TreeNode> for NodeFields<'a> {
    fn from(node: &'a TreeNode) -> Self {
        Self {
            structure_node_id: &node.structure_node_id,
            parent_id: node.parent_id.as_deref(),
            name: &node.name,
            description: node.description.as_deref(),
            level: node.level,
            is_active: node.is_active,
            extra: &node.extra,
        }
    }
}

enum Step<'a> {
    Open(&'a TreeNode),
    Close,
}

fn push_visible<'a>(stack: &mut Vec<Step<'a>>, siblings: &'a [TreeNode], hide_inactive: bool) {
    stack.extend(
        siblings
            .iter()
            .rev()
            .filter(|n| visible(n, hide_inactive))
            .map(Step::Open),
    );
}

/// Write the forest as `{"success":true,"data":[...]}` with nested
/// `children` arrays. Nesting is tracked on an explicit stack, so depth is
/// bounded by memory only.
pub fn render_json(forest: &[TreeNode], hide_inactive: bool) -> Result<String, serde_json::Error> {
    let mut out = String::from("{\"success\":true,\"data\":[");
    let mut stack = Vec::new();
    push_visible(&mut stack, forest, hide_inactive);

    let mut first = true;
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(node) => {
                if !first {
                    out.push(',');
                }
                let fields = serde_json::to_string(&NodeFields::from(node))?;
                // Reopen the object to append the children array
                out.push_str(fields.strip_suffix('}').unwrap_or(&fields));
                out.push_str(",\"children\":[");
                first = true;
                stack.push(Step::Close);
                push_visible(&mut stack, &node.children, hide_inactive);
            }
            Step::Close => {
                out.push_str("]}");
                first = false;
            }
        }
    }

    out.push_str("]}");
    Ok(out)
}

/// Render the records as received, one per line, in input order
pub fn render_list(nodes: &[FlatNode], options: &RenderOptions) -> String {
    let mut out = String::new();
    for node in nodes {
        if options.hide_inactive && !node.is_active {
            continue;
        }
        out.push_str(&label(&node.name, &node.structure_node_id, node.is_active));
        out.push_str(&format!(
            "  parent={}",
            node.parent_id.as_deref().unwrap_or("-")
        ));
        if let Some(level) = node.level {
            out.push_str(&format!("  level={}", level));
        }
        out.push('\n');
    }
    out
}
