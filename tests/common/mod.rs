#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result};
use serde_json::{json, Value};
use structure_tree::hierarchy::FlatNode;

pub fn node(id: &str, parent: Option<&str>) -> FlatNode {
    FlatNode::new(id, parent, format!("Node {}", id))
}

/// A small organization: two regions under HQ, a depot under one region,
/// and a separate academy root.
pub fn organization() -> Value {
    json!([
        { "structure_node_id": "hq", "parent_id": null, "name": "Headquarters", "level": 1, "is_active": true },
        { "structure_node_id": "north", "parent_id": "hq", "name": "North Region", "level": 2, "is_active": true },
        { "structure_node_id": "south", "parent_id": "hq", "name": "South Region", "level": 2, "is_active": false },
        { "structure_node_id": "depot", "parent_id": "north", "name": "North Depot", "level": 3, "is_active": true },
        { "structure_node_id": "academy", "parent_id": null, "name": "Academy", "level": 1, "is_active": true }
    ])
}

/// Run the built CLI with `stdin` piped in
pub fn run_cli(args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_structree"))
        .args(args)
        .env("APP_ENV", "development")
        .env("RUST_LOG", "off")
        .env_remove("SOURCE_URL")
        .env_remove("HIERARCHY_STRICT")
        .env_remove("HIERARCHY_DEFAULT_ORDER")
        .env_remove("HIERARCHY_DANGLING_POLICY")
        .env_remove("OUTPUT_HIDE_INACTIVE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("failed to spawn structree binary")?;

    child
        .stdin
        .take()
        .context("stdin not piped")?
        .write_all(stdin.as_bytes())?;

    Ok(child.wait_with_output()?)
}
